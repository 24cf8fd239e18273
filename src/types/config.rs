//! Tuning for one mouth
//!
//! Every field has a default from the crate constants, so a config file only
//! needs the values it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    DEFAULT_ALERT_CLOSE_DURATION, DEFAULT_ALERT_DISTANCE, DEFAULT_ALERT_OPEN_DURATION,
    DEFAULT_BITE_CLOSE_DURATION, DEFAULT_BITE_THRESHOLD_FRAME_OFFSET,
    DEFAULT_CHOMPS_AFTER_SNAP, DEFAULT_CHOMP_CLOSE_DURATION, DEFAULT_CHOMP_COUNT,
    DEFAULT_CHOMP_OPEN_DURATION, DEFAULT_CHOMP_OPEN_FRAME_OFFSET,
    DEFAULT_DANGER_ALERT_PROGRESS, DEFAULT_MOUTH_COUNTDOWN_DURATION,
    DEFAULT_RETRY_PROMPT_DELAY, DEFAULT_RING_VISIBLE_MIN_FRAME_INDEX, DURATION_EPSILON,
    MAX_CHOMP_COUNT,
};

/// When the ring may be pulled out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityPolicy {
    /// Only while counting down, opening, or idle at the open pose
    #[default]
    Narrow,
    /// Whenever the mouth is above the bite threshold frame
    Wide,
}

/// Narrow policy: whether the opening sweep is always safe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OpeningCollect {
    #[default]
    Always,
    /// Only once the opening sweep is above the bite threshold frame
    AboveBiteThreshold,
}

/// What a finger entering the mouth zone does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BiteMode {
    /// Start the safe-window countdown
    #[default]
    Countdown,
    /// Only remember the finger; the alert close does the biting
    Proximity,
}

/// Flat set of named tuning values, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouthConfig {
    pub alert_distance: f32,
    pub alert_close_duration: f32,
    pub alert_open_duration: f32,
    pub mouth_countdown_duration: f32,
    pub bite_close_duration: f32,
    pub bite_threshold_frame_offset: i32,
    pub chomp_open_duration: f32,
    pub chomp_close_duration: f32,
    pub chomp_open_frame_offset: i32,
    pub chomp_count: u32,
    pub chomps_after_snap: u32,
    pub ring_visible_min_frame_index: i32,
    /// Fraction of the alert close after which a resting finger is bitten
    pub danger_alert_progress: f32,
    pub eligibility: EligibilityPolicy,
    pub opening_collect: OpeningCollect,
    pub bite_mode: BiteMode,
    pub retry_prompt_delay: f32,
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            alert_distance: DEFAULT_ALERT_DISTANCE,
            alert_close_duration: DEFAULT_ALERT_CLOSE_DURATION,
            alert_open_duration: DEFAULT_ALERT_OPEN_DURATION,
            mouth_countdown_duration: DEFAULT_MOUTH_COUNTDOWN_DURATION,
            bite_close_duration: DEFAULT_BITE_CLOSE_DURATION,
            bite_threshold_frame_offset: DEFAULT_BITE_THRESHOLD_FRAME_OFFSET,
            chomp_open_duration: DEFAULT_CHOMP_OPEN_DURATION,
            chomp_close_duration: DEFAULT_CHOMP_CLOSE_DURATION,
            chomp_open_frame_offset: DEFAULT_CHOMP_OPEN_FRAME_OFFSET,
            chomp_count: DEFAULT_CHOMP_COUNT,
            chomps_after_snap: DEFAULT_CHOMPS_AFTER_SNAP,
            ring_visible_min_frame_index: DEFAULT_RING_VISIBLE_MIN_FRAME_INDEX,
            danger_alert_progress: DEFAULT_DANGER_ALERT_PROGRESS,
            eligibility: EligibilityPolicy::default(),
            opening_collect: OpeningCollect::default(),
            bite_mode: BiteMode::default(),
            retry_prompt_delay: DEFAULT_RETRY_PROMPT_DELAY,
        }
    }
}

impl MouthConfig {
    pub fn with_eligibility(mut self, eligibility: EligibilityPolicy) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_bite_mode(mut self, bite_mode: BiteMode) -> Self {
        self.bite_mode = bite_mode;
        self
    }

    pub fn with_opening_collect(mut self, opening_collect: OpeningCollect) -> Self {
        self.opening_collect = opening_collect;
        self
    }

    /// Reject chomp counts above `MAX_CHOMP_COUNT`
    pub fn validate(&self) -> Result<(), ConfigReason> {
        if self.chomp_count > MAX_CHOMP_COUNT || self.chomps_after_snap > MAX_CHOMP_COUNT {
            return Err(ConfigReason::R103_CONFIG_OUT_OF_RANGE);
        }
        Ok(())
    }
}

/// Durations are divisors: never let one reach zero
pub fn floor_duration(duration: f32) -> f32 {
    if duration.is_nan() {
        return DURATION_EPSILON;
    }
    duration.max(DURATION_EPSILON)
}

/// Reason codes for config loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[allow(non_camel_case_types)]
pub enum ConfigReason {
    /// Config file could not be read
    #[error("R101_CONFIG_UNREADABLE: config file could not be read")]
    R101_CONFIG_UNREADABLE,
    /// Config file is not valid JSON for MouthConfig
    #[error("R102_CONFIG_INVALID: config file is not a valid mouth config")]
    R102_CONFIG_INVALID,
    /// A value is outside its allowed range
    #[error("R103_CONFIG_OUT_OF_RANGE: config value out of range")]
    R103_CONFIG_OUT_OF_RANGE,
}

impl ConfigReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_CONFIG_UNREADABLE => "R101_CONFIG_UNREADABLE",
            Self::R102_CONFIG_INVALID => "R102_CONFIG_INVALID",
            Self::R103_CONFIG_OUT_OF_RANGE => "R103_CONFIG_OUT_OF_RANGE",
        }
    }
}

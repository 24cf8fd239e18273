//! Per-tick output of the mouth

use colored::Colorize;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::{MouthPhase, ReasonCode};

/// Immutable view of the mouth after a tick or command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouthSnapshot {
    /// Ticks processed so far
    pub tick: u64,
    /// Current phase
    pub phase: MouthPhase,
    /// Current frame, -1 before the first frame is set
    pub frame_index: i32,
    /// Renderer reference of the current frame
    pub visual_ref: Option<String>,
    /// Eye socket offset of the current frame
    pub secondary_offset: Option<Vec2>,
    /// Should the ring be drawn?
    pub ring_visible: bool,
    /// Would a resting finger be bitten?
    pub dangerous: bool,
    /// Would a collection attempt succeed right now?
    pub can_collect: bool,
    /// Seconds left in the safe window (0 outside the countdown)
    pub remaining_time: f32,
    /// Finger inside the mouth zone?
    pub finger_inside: bool,
    /// Finger tip to ring distance from the last tick
    pub distance: Option<f32>,
    /// Bite completion event has been raised
    pub bite_fired: bool,
    /// Why the mouth is where it is
    pub reason: ReasonCode,
}

impl MouthSnapshot {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} frame={:>2} | phase={} | left={:.2}s | ring={} | {}",
            self.phase.emoji(),
            self.frame_index,
            self.phase,
            self.remaining_time,
            if self.ring_visible { "shown" } else { "hidden" },
            self.reason.code()
        );
        let line = line.color(self.phase.color());
        if self.dangerous {
            line.bold().to_string()
        } else {
            line.to_string()
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "tick={} | frame={} | phase={} | left={:.2} | ring={} | danger={} | collect={} | reason={}",
            self.tick,
            self.frame_index,
            self.phase,
            self.remaining_time,
            self.ring_visible,
            self.dangerous,
            self.can_collect,
            self.reason.code()
        )
    }
}

/// Result of pulling at the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectOutcome {
    Collected,
    Rejected,
}

impl CollectOutcome {
    pub fn is_collected(&self) -> bool {
        matches!(self, CollectOutcome::Collected)
    }
}

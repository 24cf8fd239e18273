//! Mouth phase definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// The six mutually exclusive phases of the mouth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MouthPhase {
    /// Mouth held open, nothing nearby
    Idle,
    /// Finger inside the alert zone, mouth sweeping shut
    AlertClosing,
    /// Finger backed off, mouth sweeping open again
    AlertOpening,
    /// Finger inside the mouth, safe window running out
    FingerInsideCounting,
    /// Bite animation playing (or finished)
    BiteChomping,
    /// Ring pulled out, mouth frozen open
    RingCollected,
}

impl MouthPhase {
    /// Terminal color for this phase
    pub fn color(&self) -> Color {
        match self {
            MouthPhase::Idle => Color::BrightBlack,
            MouthPhase::AlertClosing => Color::Yellow,
            MouthPhase::AlertOpening => Color::Cyan,
            MouthPhase::FingerInsideCounting => Color::Magenta,
            MouthPhase::BiteChomping => Color::Red,
            MouthPhase::RingCollected => Color::Green,
        }
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            MouthPhase::Idle => "😮",
            MouthPhase::AlertClosing => "😬",
            MouthPhase::AlertOpening => "😯",
            MouthPhase::FingerInsideCounting => "⏳",
            MouthPhase::BiteChomping => "🦷",
            MouthPhase::RingCollected => "💍",
        }
    }

    /// Mouth is actively threatening (alert close, countdown or bite)
    pub fn is_threatening(&self) -> bool {
        matches!(
            self,
            MouthPhase::AlertClosing | MouthPhase::FingerInsideCounting | MouthPhase::BiteChomping
        )
    }
}

impl std::fmt::Display for MouthPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MouthPhase::Idle => "IDLE",
            MouthPhase::AlertClosing => "ALERT_CLOSING",
            MouthPhase::AlertOpening => "ALERT_OPENING",
            MouthPhase::FingerInsideCounting => "FINGER_INSIDE_COUNTING",
            MouthPhase::BiteChomping => "BITE_CHOMPING",
            MouthPhase::RingCollected => "RING_COLLECTED",
        };
        write!(f, "{}", name)
    }
}

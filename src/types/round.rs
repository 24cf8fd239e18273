//! Outcome of one play-through

use serde::{Deserialize, Serialize};

use crate::types::MouthSnapshot;

/// How the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundOutcome {
    Playing,
    /// Ring collected
    Won,
    /// Bite completed
    Bitten,
}

impl RoundOutcome {
    pub fn is_ended(&self) -> bool {
        !matches!(self, RoundOutcome::Playing)
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundOutcome::Playing => "PLAYING",
            RoundOutcome::Won => "WON",
            RoundOutcome::Bitten => "BITTEN",
        };
        write!(f, "{}", name)
    }
}

/// What the player's hand looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandState {
    Open,
    WithRing,
    Cut,
}

/// Round-level view after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Steps processed so far
    pub step: u64,
    pub outcome: RoundOutcome,
    pub hand: HandState,
    /// Finger inside the mouth zone, as reported by zone edges
    pub finger_in_zone: bool,
    /// Try-again popup should be shown
    pub retry_prompt_visible: bool,
    pub mouth: MouthSnapshot,
}

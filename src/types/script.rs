//! Script commands for the scripted driver

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One line of a round script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Move the finger tip
    Finger { at: Vec2 },
    /// Move the ring
    Ring { at: Vec2 },
    /// Advance `repeat` steps of `dt` seconds
    Tick { dt: f32, repeat: u32 },
    /// Finger entered the mouth zone
    Enter,
    /// Finger left the mouth zone
    Exit,
    /// Finger touched the ring
    Touch,
    /// Force a bite
    Bite,
    /// Start the round over
    Restart,
}

/// Reason codes for script parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[allow(non_camel_case_types)]
pub enum ScriptReason {
    /// Command word not recognized
    #[error("R201_SCRIPT_UNKNOWN_COMMAND: unknown command")]
    R201_SCRIPT_UNKNOWN_COMMAND,
    /// Command recognized but its arguments are malformed
    #[error("R202_SCRIPT_BAD_ARGUMENTS: malformed arguments")]
    R202_SCRIPT_BAD_ARGUMENTS,
    /// Script file could not be read
    #[error("R203_SCRIPT_UNREADABLE: script could not be read")]
    R203_SCRIPT_UNREADABLE,
}

impl ScriptReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R201_SCRIPT_UNKNOWN_COMMAND => "R201_SCRIPT_UNKNOWN_COMMAND",
            Self::R202_SCRIPT_BAD_ARGUMENTS => "R202_SCRIPT_BAD_ARGUMENTS",
            Self::R203_SCRIPT_UNREADABLE => "R203_SCRIPT_UNREADABLE",
        }
    }
}

/// A script error tied to its 1-based line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ScriptError {
    pub line: usize,
    pub reason: ScriptReason,
}

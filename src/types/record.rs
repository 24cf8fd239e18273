//! Record of a finished round
//!
//! The frame trace itself is not stored, only its SHA-256 fingerprint, so a
//! replay can prove it reproduced the same animation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MouthConfig, RoundOutcome};

/// A finished (or abandoned) round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier
    pub id: String,
    /// When this record was created (Unix timestamp)
    pub timestamp_unix: i64,
    pub outcome: RoundOutcome,
    /// Steps the round ran for
    pub steps: u64,
    /// Bite events raised (0 or 1)
    pub bite_events: u32,
    /// Frame index after the last step
    pub final_frame: i32,
    /// Hex SHA-256 of the per-step frame trace
    pub trace_fingerprint: String,
    pub config: MouthConfig,
}

/// Reason codes for record storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[allow(non_camel_case_types)]
pub enum RecordReason {
    /// Record could not be serialized or parsed
    #[error("R501_RECORD_SERIALIZE_ERROR: record could not be (de)serialized")]
    R501_RECORD_SERIALIZE_ERROR,
    /// Record could not be written or read
    #[error("R502_RECORD_STORAGE_ERROR: record could not be stored or read")]
    R502_RECORD_STORAGE_ERROR,
    /// Fingerprint does not match the trace
    #[error("R503_RECORD_FINGERPRINT_MISMATCH: trace does not match the record")]
    R503_RECORD_FINGERPRINT_MISMATCH,
}

impl RecordReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R501_RECORD_SERIALIZE_ERROR => "R501_RECORD_SERIALIZE_ERROR",
            Self::R502_RECORD_STORAGE_ERROR => "R502_RECORD_STORAGE_ERROR",
            Self::R503_RECORD_FINGERPRINT_MISMATCH => "R503_RECORD_FINGERPRINT_MISMATCH",
        }
    }
}

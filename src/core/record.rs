//! Round records: trace fingerprint, JSON storage, verification

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::core::round::Round;
use crate::types::{RecordReason, RoundRecord};

/// SHA-256 over the frame trace, each index as 4 big-endian bytes
pub fn fingerprint(trace: &[i32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for frame in trace {
        hasher.update(frame.to_be_bytes());
    }
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Lowercase hex of `fingerprint(trace)`
pub fn fingerprint_hex(trace: &[i32]) -> String {
    fingerprint(trace).iter().map(|b| format!("{:02x}", b)).collect()
}

impl RoundRecord {
    /// Capture a round as it stands now
    pub fn from_round(round: &Round) -> Self {
        let trace_fingerprint = fingerprint_hex(round.trace());
        let now = chrono::Utc::now();
        let id = format!(
            "round_{}_{}",
            now.format("%Y%m%d_%H%M%S"),
            &trace_fingerprint[0..8]
        );

        Self {
            id,
            timestamp_unix: now.timestamp(),
            outcome: round.outcome(),
            steps: round.steps(),
            bite_events: round.bite_events(),
            final_frame: round.mouth().current_frame(),
            trace_fingerprint,
            config: round.config().clone(),
        }
    }
}

/// Save record as pretty JSON under `dir`, returning the file path
pub fn save_record(record: &RoundRecord, dir: &str) -> Result<String, RecordReason> {
    let filename = format!("{}/{}.json", dir, record.id);

    let json = serde_json::to_string_pretty(record)
        .map_err(|_| RecordReason::R501_RECORD_SERIALIZE_ERROR)?;

    std::fs::create_dir_all(dir)
        .map_err(|_| RecordReason::R502_RECORD_STORAGE_ERROR)?;

    std::fs::write(&filename, json)
        .map_err(|_| RecordReason::R502_RECORD_STORAGE_ERROR)?;

    Ok(filename)
}

/// Load record from JSON file
pub fn load_record(path: &str) -> Result<RoundRecord, RecordReason> {
    let json = std::fs::read_to_string(path)
        .map_err(|_| RecordReason::R502_RECORD_STORAGE_ERROR)?;

    serde_json::from_str(&json)
        .map_err(|_| RecordReason::R501_RECORD_SERIALIZE_ERROR)
}

/// Check that `trace` is the trace the record was made from
pub fn verify_record(record: &RoundRecord, trace: &[i32]) -> Result<(), RecordReason> {
    if record.steps != trace.len() as u64 || record.trace_fingerprint != fingerprint_hex(trace) {
        warn!(id = %record.id, "record does not match trace");
        return Err(RecordReason::R503_RECORD_FINGERPRINT_MISMATCH);
    }
    Ok(())
}

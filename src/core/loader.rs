//! JSON loading for mouth configs and frame tables

use tracing::warn;

use crate::types::{ConfigReason, FrameReason, FrameTable, MouthConfig};

/// Load a `MouthConfig`; missing fields take their defaults
pub fn load_config(path: &str) -> Result<MouthConfig, ConfigReason> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        warn!(path, error = %e, "config unreadable");
        ConfigReason::R101_CONFIG_UNREADABLE
    })?;

    let config: MouthConfig = serde_json::from_str(&json).map_err(|e| {
        warn!(path, error = %e, "config invalid");
        ConfigReason::R102_CONFIG_INVALID
    })?;
    config.validate().map_err(|reason| {
        warn!(path, reason = reason.code(), "config out of range");
        reason
    })?;
    Ok(config)
}

/// Load a frame table: a JSON array of `{ "visual_ref", "secondary_offset" }`
pub fn load_frame_table(path: &str) -> Result<FrameTable, FrameReason> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        warn!(path, error = %e, "frame file unreadable");
        FrameReason::R402_FRAME_FILE_UNREADABLE
    })?;

    parse_frame_table(&json)
}

/// Parse a frame table from JSON text
pub fn parse_frame_table(json: &str) -> Result<FrameTable, FrameReason> {
    let frames: Vec<crate::types::Frame> = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "frame file invalid");
        FrameReason::R403_FRAME_FILE_INVALID
    })?;
    FrameTable::new(frames)
}

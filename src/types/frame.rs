//! Animation frames along the closed -> open axis

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MAX_FRAME_COUNT;

/// One pose of the mouth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Opaque reference for the renderer (sprite name, atlas key, ...)
    pub visual_ref: String,
    /// Eye socket position for this pose, relative to the monster
    #[serde(default)]
    pub secondary_offset: Vec2,
}

impl Frame {
    pub fn new(visual_ref: impl Into<String>, secondary_offset: Vec2) -> Self {
        Self {
            visual_ref: visual_ref.into(),
            secondary_offset,
        }
    }
}

/// Ordered, non-empty list of frames.
///
/// Index 0 is the fully closed pose, the last index the fully open one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Frame>", into = "Vec<Frame>")]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    /// Build a table of 1..=`MAX_FRAME_COUNT` frames
    pub fn new(frames: Vec<Frame>) -> Result<Self, FrameReason> {
        Self::check_count(frames.len())?;
        Ok(Self { frames })
    }

    /// `count` frames named `mouth_00..`, eye socket drifting up as the mouth opens
    pub fn uniform(count: usize) -> Result<Self, FrameReason> {
        // Checked before allocating
        Self::check_count(count)?;
        let frames = (0..count)
            .map(|i| Frame::new(format!("mouth_{:02}", i), Vec2::new(0.0, i as f32 * 0.05)))
            .collect();
        Self::new(frames)
    }

    fn check_count(count: usize) -> Result<(), FrameReason> {
        match count {
            0 => Err(FrameReason::R401_FRAME_TABLE_EMPTY),
            n if n > MAX_FRAME_COUNT => Err(FrameReason::R404_FRAME_TABLE_TOO_LARGE),
            _ => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: i32) -> Option<&Frame> {
        usize::try_from(index).ok().and_then(|i| self.frames.get(i))
    }

    pub fn closed_index(&self) -> i32 {
        0
    }

    pub fn open_index(&self) -> i32 {
        // len is bounded by MAX_FRAME_COUNT
        self.frames.len() as i32 - 1
    }

    /// One frame above closed, or closed itself for single-frame tables
    pub fn almost_closed_index(&self) -> i32 {
        if self.frames.len() < 2 {
            self.closed_index()
        } else {
            1
        }
    }

    /// Clamp any index into `[closed, open]`
    pub fn clamp(&self, index: i32) -> i32 {
        index.clamp(self.closed_index(), self.open_index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

impl TryFrom<Vec<Frame>> for FrameTable {
    type Error = FrameReason;

    fn try_from(frames: Vec<Frame>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl From<FrameTable> for Vec<Frame> {
    fn from(table: FrameTable) -> Self {
        table.frames
    }
}

/// Reason codes for frame table construction and loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[allow(non_camel_case_types)]
pub enum FrameReason {
    /// No frames at all
    #[error("R401_FRAME_TABLE_EMPTY: frame table has no frames")]
    R401_FRAME_TABLE_EMPTY,
    /// Frame file could not be read
    #[error("R402_FRAME_FILE_UNREADABLE: frame file could not be read")]
    R402_FRAME_FILE_UNREADABLE,
    /// Frame file is not a valid frame list
    #[error("R403_FRAME_FILE_INVALID: frame file is not a valid frame list")]
    R403_FRAME_FILE_INVALID,
    /// More frames than `MAX_FRAME_COUNT`
    #[error("R404_FRAME_TABLE_TOO_LARGE: frame table has too many frames")]
    R404_FRAME_TABLE_TOO_LARGE,
}

impl FrameReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R401_FRAME_TABLE_EMPTY => "R401_FRAME_TABLE_EMPTY",
            Self::R402_FRAME_FILE_UNREADABLE => "R402_FRAME_FILE_UNREADABLE",
            Self::R403_FRAME_FILE_INVALID => "R403_FRAME_FILE_INVALID",
            Self::R404_FRAME_TABLE_TOO_LARGE => "R404_FRAME_TABLE_TOO_LARGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(FrameTable::new(Vec::new()), Err(FrameReason::R401_FRAME_TABLE_EMPTY));
        assert!(FrameTable::uniform(0).is_err());
    }

    #[test]
    fn test_oversized_table_rejected() {
        assert!(FrameTable::uniform(MAX_FRAME_COUNT).is_ok());
        assert_eq!(
            FrameTable::uniform(MAX_FRAME_COUNT + 1),
            Err(FrameReason::R404_FRAME_TABLE_TOO_LARGE)
        );
        assert_eq!(FrameTable::uniform(usize::MAX), Err(FrameReason::R404_FRAME_TABLE_TOO_LARGE));
    }

    #[test]
    fn test_indices() {
        let table = FrameTable::uniform(6).unwrap();
        assert_eq!(table.closed_index(), 0);
        assert_eq!(table.almost_closed_index(), 1);
        assert_eq!(table.open_index(), 5);
        assert_eq!(table.clamp(9), 5);
        assert_eq!(table.clamp(-3), 0);
        assert!(table.get(-1).is_none());
        assert_eq!(table.get(2).unwrap().visual_ref, "mouth_02");
    }

    #[test]
    fn test_single_frame_degenerates() {
        let table = FrameTable::uniform(1).unwrap();
        assert_eq!(table.closed_index(), 0);
        assert_eq!(table.almost_closed_index(), 0);
        assert_eq!(table.open_index(), 0);
    }

    #[test]
    fn test_deserialize_rejects_empty_list() {
        let err = serde_json::from_str::<FrameTable>("[]");
        assert!(err.is_err());

        let table: FrameTable =
            serde_json::from_str(r#"[{"visual_ref": "closed"}, {"visual_ref": "open", "secondary_offset": [0.0, 0.2]}]"#)
                .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().secondary_offset, Vec2::new(0.0, 0.2));
    }
}

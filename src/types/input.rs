//! What the outside world feeds a round each step

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default finger position, well outside any alert zone
pub const FAR_AWAY: Vec2 = Vec2::new(1.0e6, 0.0);

/// Edge reported by the mouth-zone collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneEdge {
    #[default]
    None,
    Entered,
    Exited,
}

/// One step of external input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Seconds since the previous step
    pub dt: f32,
    /// Finger tip position
    pub finger: Vec2,
    /// Ring position
    pub ring: Vec2,
    /// Mouth-zone edge this step, if any
    pub zone: ZoneEdge,
    /// Finger touched the ring this step
    pub ring_touched: bool,
    /// Something outside demands a bite this step
    pub force_bite: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            dt: 0.0,
            finger: FAR_AWAY,
            ring: Vec2::ZERO,
            zone: ZoneEdge::None,
            ring_touched: false,
            force_bite: false,
        }
    }
}

impl FrameInput {
    /// Plain time step with the finger and ring where they are
    pub fn at(dt: f32, finger: Vec2, ring: Vec2) -> Self {
        Self {
            dt,
            finger,
            ring,
            ..Self::default()
        }
    }

    pub fn with_zone(mut self, zone: ZoneEdge) -> Self {
        self.zone = zone;
        self
    }

    pub fn touching_ring(mut self) -> Self {
        self.ring_touched = true;
        self
    }

    pub fn forcing_bite(mut self) -> Self {
        self.force_bite = true;
        self
    }
}

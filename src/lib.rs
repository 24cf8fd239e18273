//! Ringbite: tick-driven mouth state machine
//!
//! A monster holds a ring in its mouth. The mouth closes as the finger
//! approaches, counts down while the finger is inside, and bites when the
//! safe window runs out. This crate decides *when* the mouth is open,
//! closing, dangerous or has bitten, and whether pulling the ring succeeds.

pub mod core;
pub mod types;

// =============================================================================
// TIMING [s] - defaults for MouthConfig
// =============================================================================

/// Distance from finger tip to ring that starts the alert close
pub const DEFAULT_ALERT_DISTANCE: f32 = 2.5;

/// Time for the alert close to sweep from its start frame to fully closed
pub const DEFAULT_ALERT_CLOSE_DURATION: f32 = 1.25;

/// Time for the mouth to reopen once the finger backs off
pub const DEFAULT_ALERT_OPEN_DURATION: f32 = 0.3;

/// Safe window while the finger sits inside the mouth
pub const DEFAULT_MOUTH_COUNTDOWN_DURATION: f32 = 2.0;

/// Snap-shut time when a bite starts from an open pose
pub const DEFAULT_BITE_CLOSE_DURATION: f32 = 0.12;

/// Chomp cycle: closed -> peak
pub const DEFAULT_CHOMP_OPEN_DURATION: f32 = 0.08;

/// Chomp cycle: peak -> closed
pub const DEFAULT_CHOMP_CLOSE_DURATION: f32 = 0.06;

/// Delay between round end and the retry prompt
pub const DEFAULT_RETRY_PROMPT_DELAY: f32 = 3.0;

// =============================================================================
// FRAMES [index] - offsets along the closed -> open axis
// =============================================================================

/// Frames above `closed + offset` still count as open enough to collect
pub const DEFAULT_BITE_THRESHOLD_FRAME_OFFSET: i32 = 1;

/// How far a chomp opens the mouth above the closed pose
pub const DEFAULT_CHOMP_OPEN_FRAME_OFFSET: i32 = 2;

/// Ring is drawn only at or above this frame
pub const DEFAULT_RING_VISIBLE_MIN_FRAME_INDEX: i32 = 5;

/// Chomps played when the bite starts from the closed pose
pub const DEFAULT_CHOMP_COUNT: u32 = 1;

/// Chomps played after the snap-shut sweep
pub const DEFAULT_CHOMPS_AFTER_SNAP: u32 = 0;

// =============================================================================
// DANGER
// =============================================================================

/// Alert-close progress from which a resting finger gets bitten
pub const DEFAULT_DANGER_ALERT_PROGRESS: f32 = 0.7;

/// Floor applied to every duration before it is used as a divisor
pub const DURATION_EPSILON: f32 = 0.01;

// =============================================================================
// LIMITS
// =============================================================================

/// Largest frame table accepted from a file, the CLI or the API
pub const MAX_FRAME_COUNT: usize = 1024;

/// Largest `chomp_count` / `chomps_after_snap` a config may ask for
pub const MAX_CHOMP_COUNT: u32 = 1000;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

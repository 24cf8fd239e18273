//! Mouth state machine: frame-stepped core
//!
//! Phase transitions:
//! - IDLE → ALERT_CLOSING: finger within alert distance of the ring
//! - ALERT_CLOSING → ALERT_OPENING: finger backs off (and is not inside)
//! - ALERT_CLOSING → BITE_CHOMPING: close finished with the finger inside
//! - ALERT_OPENING → ALERT_CLOSING: finger back, resume from current frame
//! - ALERT_OPENING → IDLE: open finished
//! - FINGER_INSIDE_COUNTING → BITE_CHOMPING: countdown expired
//! - FINGER_INSIDE_COUNTING → ALERT_OPENING: finger left the mouth
//! - any live phase → BITE_CHOMPING: forced bite, finger into a shut mouth,
//!   resting finger in a dangerous mouth, rejected collection
//! - any live phase → RING_COLLECTED: accepted collection
//!
//! RING_COLLECTED and a finished BITE_CHOMPING never change again.

use glam::Vec2;
use tracing::{debug, info};

use crate::core::arbiter::CollectionArbiter;
use crate::core::notifier::{BiteNotifier, ListenerId};
use crate::core::proximity::ProximityGate;
use crate::core::sweep::{interpolate_frame, lerp_frame, progress, BiteTimeline};
use crate::types::{
    floor_duration, BiteMode, CollectOutcome, FrameTable, MouthConfig, MouthPhase,
    MouthSnapshot, ReasonCode,
};

/// Frame index before the first frame is set
pub const UNSET_FRAME: i32 = -1;

/// The mouth: one writer, advanced once per tick
#[derive(Debug)]
pub struct MouthStateMachine {
    config: MouthConfig,
    frames: Option<FrameTable>,
    gate: ProximityGate,
    arbiter: CollectionArbiter,
    phase: MouthPhase,
    /// Elapsed seconds (alert, bite) or remaining seconds (countdown)
    phase_timer: f32,
    /// Interpolation source captured on phase entry
    phase_start_frame: i32,
    current_frame: i32,
    finger_inside: bool,
    bite: Option<BiteTimeline>,
    bite_complete: bool,
    notifier: BiteNotifier,
    ring_visible: bool,
    last_distance: Option<f32>,
    last_reason: ReasonCode,
    tick_count: u64,
    frame_changes: u64,
}

impl MouthStateMachine {
    /// Create an uninitialized machine; call `init` before the first tick
    pub fn new(config: MouthConfig, frames: FrameTable) -> Self {
        Self::build(config, Some(frames))
    }

    /// Machine with nothing to animate: every tick and command is a no-op
    pub fn without_frames(config: MouthConfig) -> Self {
        Self::build(config, None)
    }

    fn build(config: MouthConfig, frames: Option<FrameTable>) -> Self {
        Self {
            gate: ProximityGate::new(config.alert_distance),
            arbiter: CollectionArbiter::from_config(&config),
            config,
            frames,
            phase: MouthPhase::Idle,
            phase_timer: 0.0,
            phase_start_frame: UNSET_FRAME,
            current_frame: UNSET_FRAME,
            finger_inside: false,
            bite: None,
            bite_complete: false,
            notifier: BiteNotifier::new(),
            ring_visible: false,
            last_distance: None,
            last_reason: ReasonCode::R001_UNINITIALIZED,
            tick_count: 0,
            frame_changes: 0,
        }
    }

    /// Put the mouth at the open pose
    pub fn init(&mut self) -> MouthSnapshot {
        match self.frames.as_ref().map(FrameTable::open_index) {
            Some(open) => {
                self.set_frame(open);
                self.last_reason = ReasonCode::R001_IDLE_OPEN;
            }
            None => self.last_reason = ReasonCode::R001_NO_FRAMES,
        }
        self.refresh_ring_visibility();
        self.snapshot()
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advance one simulation step.
    ///
    /// Proximity is measured first, then the current phase runs. At most one
    /// phase transition is committed, except that a close started this tick
    /// already advances by `dt` and may end in a bite.
    pub fn tick(&mut self, dt: f32, finger: Vec2, ring: Vec2) -> MouthSnapshot {
        self.tick_count += 1;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.frames.is_none() {
            self.last_reason = ReasonCode::R001_NO_FRAMES;
            return self.snapshot();
        }

        let (distance, near) = self.gate.measure(finger, ring);
        self.last_distance = Some(distance);

        let reason = match self.phase {
            MouthPhase::RingCollected => ReasonCode::R005_RING_COLLECTED,
            MouthPhase::BiteChomping => self.advance_bite(dt),
            MouthPhase::FingerInsideCounting => self.advance_countdown(dt),
            MouthPhase::AlertOpening => {
                if near {
                    self.start_alert_closing(dt, ReasonCode::R002_ALERT_CLOSING_RESUMED)
                } else {
                    self.advance_alert_opening(dt)
                }
            }
            MouthPhase::AlertClosing => {
                if !near && !self.finger_inside {
                    self.enter_alert_opening(ReasonCode::R002_ALERT_OPENING_STARTED)
                } else {
                    self.advance_alert_closing(dt)
                }
            }
            MouthPhase::Idle => {
                if near {
                    self.start_alert_closing(dt, ReasonCode::R002_ALERT_CLOSING_STARTED)
                } else {
                    self.set_frame(self.open_frame());
                    ReasonCode::R001_IDLE_OPEN
                }
            }
        };

        self.last_reason = reason;
        self.refresh_ring_visibility();
        self.snapshot()
    }

    /// Enter ALERT_CLOSING and spend this tick's `dt` on the close.
    /// Keeps the entry reason unless the close already bit.
    fn start_alert_closing(&mut self, dt: f32, reason: ReasonCode) -> ReasonCode {
        let entered = self.enter_alert_closing(reason);
        match self.advance_alert_closing(dt) {
            bite if bite.starts_bite() => bite,
            _ => entered,
        }
    }

    fn advance_alert_closing(&mut self, dt: f32) -> ReasonCode {
        self.phase_timer += dt;
        let duration = self.config.alert_close_duration;
        let frame = interpolate_frame(self.phase_start_frame, self.closed_frame(), self.phase_timer, duration);
        self.set_frame(frame);

        if progress(self.phase_timer, duration) < 1.0 {
            return ReasonCode::R002_ALERT_CLOSING;
        }
        if self.finger_inside {
            self.enter_bite(ReasonCode::R004_BITE_ALERT_CLOSED_ON_FINGER)
        } else {
            ReasonCode::R002_ALERT_CLOSED_HOLD
        }
    }

    fn advance_alert_opening(&mut self, dt: f32) -> ReasonCode {
        self.phase_timer += dt;
        let duration = self.config.alert_open_duration;
        let frame = interpolate_frame(self.phase_start_frame, self.open_frame(), self.phase_timer, duration);
        self.set_frame(frame);

        if progress(self.phase_timer, duration) < 1.0 {
            return ReasonCode::R002_ALERT_OPENING;
        }
        let start = self.current_frame;
        self.enter_phase(MouthPhase::Idle, start, 0.0, ReasonCode::R002_ALERT_OPENED)
    }

    fn advance_countdown(&mut self, dt: f32) -> ReasonCode {
        self.phase_timer -= dt;
        if self.phase_timer <= 0.0 {
            self.phase_timer = 0.0;
            return self.enter_bite(ReasonCode::R004_BITE_COUNTDOWN_EXPIRED);
        }

        let remaining = self.phase_timer / floor_duration(self.config.mouth_countdown_duration);
        let frame = lerp_frame(self.almost_closed_frame(), self.open_frame(), remaining);
        self.set_frame(frame);
        ReasonCode::R003_COUNTDOWN_RUNNING
    }

    fn advance_bite(&mut self, dt: f32) -> ReasonCode {
        if self.bite_complete {
            return ReasonCode::R004_BITE_COMPLETE;
        }

        let Some(timeline) = self.bite.as_mut() else {
            self.complete_bite();
            return ReasonCode::R004_BITE_COMPLETE;
        };
        let frame = timeline.advance(dt);
        let finished = timeline.is_finished();
        self.phase_timer = timeline.elapsed();
        self.set_frame(frame);

        if finished {
            self.complete_bite();
            ReasonCode::R004_BITE_COMPLETE
        } else {
            ReasonCode::R004_BITE_CHOMPING
        }
    }

    // =========================================================================
    // PHASE ENTRY
    // =========================================================================

    fn enter_phase(&mut self, phase: MouthPhase, start_frame: i32, timer: f32, reason: ReasonCode) -> ReasonCode {
        debug!(
            from = %self.phase,
            to = %phase,
            start_frame,
            reason = reason.code(),
            "phase change"
        );
        self.phase = phase;
        self.phase_start_frame = start_frame;
        self.phase_timer = timer;
        reason
    }

    fn enter_alert_closing(&mut self, reason: ReasonCode) -> ReasonCode {
        let start = self.frame_or(self.open_frame());
        self.enter_phase(MouthPhase::AlertClosing, start, 0.0, reason)
    }

    fn enter_alert_opening(&mut self, reason: ReasonCode) -> ReasonCode {
        let start = self.frame_or(self.closed_frame());
        self.enter_phase(MouthPhase::AlertOpening, start, 0.0, reason)
    }

    fn enter_bite(&mut self, reason: ReasonCode) -> ReasonCode {
        let start = self.frame_or(self.open_frame());
        let timeline = BiteTimeline::plan(start, self.closed_frame(), self.open_frame(), &self.config);
        let instant = timeline.is_empty();

        self.finger_inside = false;
        self.bite = Some(timeline);
        let reason = self.enter_phase(MouthPhase::BiteChomping, start, 0.0, reason);
        info!(reason = reason.code(), start_frame = start, "bite started");

        // Nothing to animate: resolve in the same call
        if instant {
            self.complete_bite();
        }
        self.refresh_ring_visibility();
        reason
    }

    fn complete_bite(&mut self) {
        self.set_frame(self.closed_frame());
        self.bite_complete = true;
        if self.notifier.fire_once() {
            info!(tick = self.tick_count, "bite complete");
        }
    }

    // =========================================================================
    // NOTIFICATIONS AND COMMANDS
    // =========================================================================

    /// Edge: finger tip entered the mouth zone
    pub fn finger_entered(&mut self) -> ReasonCode {
        let reason = if self.frames.is_none() {
            ReasonCode::R001_NO_FRAMES
        } else if self.is_resolved() {
            ReasonCode::R006_IGNORED_RESOLVED
        } else if self.finger_inside {
            ReasonCode::R006_IGNORED_REDUNDANT
        } else {
            self.finger_inside = true;
            if self.is_fully_closed() {
                self.enter_bite(ReasonCode::R004_BITE_CLOSED_MOUTH_ENTERED)
            } else {
                match self.config.bite_mode {
                    BiteMode::Countdown => {
                        let start = self.frame_or(self.open_frame());
                        let countdown = self.config.mouth_countdown_duration.max(0.0);
                        let reason = self.enter_phase(
                            MouthPhase::FingerInsideCounting,
                            start,
                            countdown,
                            ReasonCode::R003_FINGER_ENTERED,
                        );
                        self.set_frame(self.open_frame());
                        reason
                    }
                    BiteMode::Proximity => ReasonCode::R003_FINGER_ENTERED,
                }
            }
        };
        self.finish_command(reason)
    }

    /// Edge: finger tip left the mouth zone
    pub fn finger_exited(&mut self) -> ReasonCode {
        let reason = if self.frames.is_none() {
            ReasonCode::R001_NO_FRAMES
        } else if self.is_resolved() {
            ReasonCode::R006_IGNORED_RESOLVED
        } else if !self.finger_inside {
            ReasonCode::R006_IGNORED_REDUNDANT
        } else {
            self.finger_inside = false;
            match self.phase {
                MouthPhase::FingerInsideCounting | MouthPhase::AlertClosing => {
                    self.enter_alert_opening(ReasonCode::R003_FINGER_EXITED)
                }
                _ => ReasonCode::R003_FINGER_EXITED,
            }
        };
        self.finish_command(reason)
    }

    /// Bite now, whatever the phase. No-op once resolved.
    pub fn force_bite(&mut self) -> ReasonCode {
        self.request_bite(ReasonCode::R004_BITE_FORCED)
    }

    /// Level-triggered check for a finger resting in the zone.
    ///
    /// Bites and returns true if the mouth is dangerous right now.
    pub fn recheck_resting_finger(&mut self) -> bool {
        if self.frames.is_none() || self.is_resolved() || !self.is_dangerous() {
            return false;
        }
        self.request_bite(ReasonCode::R004_BITE_DANGEROUS_REST);
        true
    }

    /// Pull the ring: collected if eligible, otherwise the mouth bites
    pub fn attempt_collect(&mut self) -> CollectOutcome {
        let arbiter = self.arbiter;
        arbiter.attempt_collect(self)
    }

    pub fn can_collect_now(&self) -> bool {
        self.arbiter.can_collect(self)
    }

    pub(crate) fn commit_collection(&mut self) {
        let open = self.open_frame();
        self.finger_inside = false;
        self.bite = None;
        let reason = self.enter_phase(MouthPhase::RingCollected, open, 0.0, ReasonCode::R005_RING_COLLECTED);
        self.set_frame(open);
        info!(tick = self.tick_count, "ring collected");
        self.finish_command(reason);
    }

    pub(crate) fn reject_collection(&mut self) {
        self.request_bite(ReasonCode::R005_COLLECT_REJECTED);
    }

    fn request_bite(&mut self, reason: ReasonCode) -> ReasonCode {
        let reason = if self.frames.is_none() {
            ReasonCode::R001_NO_FRAMES
        } else if self.is_resolved() {
            ReasonCode::R006_IGNORED_RESOLVED
        } else {
            self.enter_bite(reason)
        };
        self.finish_command(reason)
    }

    fn finish_command(&mut self, reason: ReasonCode) -> ReasonCode {
        if !matches!(reason, ReasonCode::R006_IGNORED_RESOLVED | ReasonCode::R006_IGNORED_REDUNDANT) {
            self.last_reason = reason;
        }
        self.refresh_ring_visibility();
        reason
    }

    // =========================================================================
    // LISTENERS
    // =========================================================================

    /// Register a bite-completion listener
    pub fn on_bite(&mut self, listener: impl FnMut() + Send + Sync + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn remove_bite_listener(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // =========================================================================
    // FRAMES
    // =========================================================================

    /// The only path that changes the frame. Clamps; no-op when unchanged.
    fn set_frame(&mut self, index: i32) -> bool {
        let Some(frames) = self.frames.as_ref() else {
            return false;
        };
        let index = frames.clamp(index);
        if index == self.current_frame {
            return false;
        }
        self.current_frame = index;
        self.frame_changes += 1;
        true
    }

    fn frame_or(&self, fallback: i32) -> i32 {
        if self.current_frame >= 0 {
            self.current_frame
        } else {
            fallback
        }
    }

    fn closed_frame(&self) -> i32 {
        self.frames.as_ref().map_or(0, FrameTable::closed_index)
    }

    fn open_frame(&self) -> i32 {
        self.frames.as_ref().map_or(0, FrameTable::open_index)
    }

    fn almost_closed_frame(&self) -> i32 {
        self.frames.as_ref().map_or(0, FrameTable::almost_closed_index)
    }

    fn refresh_ring_visibility(&mut self) {
        self.ring_visible = match self.frames.as_ref() {
            None => false,
            Some(_) if self.is_resolved() => false,
            Some(frames) => {
                let min_visible = self.config.ring_visible_min_frame_index.clamp(0, frames.open_index());
                self.current_frame >= min_visible
            }
        };
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Bite triggered, mouth shut, or alert close far enough along
    pub fn is_dangerous(&self) -> bool {
        if self.frames.is_none() || self.is_ring_collected() {
            return false;
        }
        if self.is_bite_triggered() || self.is_fully_closed() {
            return true;
        }
        self.phase == MouthPhase::AlertClosing
            && self.alert_close_progress() >= self.config.danger_alert_progress
    }

    /// Fraction of the alert close covered (0 outside ALERT_CLOSING)
    pub fn alert_close_progress(&self) -> f32 {
        if self.phase == MouthPhase::AlertClosing {
            progress(self.phase_timer, self.config.alert_close_duration)
        } else {
            0.0
        }
    }

    pub fn is_fully_closed(&self) -> bool {
        self.current_frame >= 0 && self.current_frame <= self.closed_frame()
    }

    /// Seconds left in the safe window
    pub fn remaining_time(&self) -> f32 {
        if self.phase == MouthPhase::FingerInsideCounting {
            self.phase_timer.max(0.0)
        } else {
            0.0
        }
    }

    pub fn is_timer_running(&self) -> bool {
        self.phase == MouthPhase::FingerInsideCounting && self.finger_inside
    }

    pub fn is_finger_inside(&self) -> bool {
        self.finger_inside
    }

    pub fn is_bite_triggered(&self) -> bool {
        self.phase == MouthPhase::BiteChomping
    }

    pub fn is_bite_complete(&self) -> bool {
        self.bite_complete
    }

    pub fn bite_event_fired(&self) -> bool {
        self.notifier.has_fired()
    }

    pub fn is_ring_collected(&self) -> bool {
        self.phase == MouthPhase::RingCollected
    }

    /// Bite triggered or ring collected: no more transitions
    pub fn is_resolved(&self) -> bool {
        self.is_bite_triggered() || self.is_ring_collected()
    }

    pub fn phase(&self) -> MouthPhase {
        self.phase
    }

    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    pub fn phase_start_frame(&self) -> i32 {
        self.phase_start_frame
    }

    pub fn ring_visible(&self) -> bool {
        self.ring_visible
    }

    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    pub fn last_reason(&self) -> ReasonCode {
        self.last_reason
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Times the visible frame actually changed
    pub fn frame_changes(&self) -> u64 {
        self.frame_changes
    }

    pub fn config(&self) -> &MouthConfig {
        &self.config
    }

    pub fn frames(&self) -> Option<&FrameTable> {
        self.frames.as_ref()
    }

    /// Current state without advancing
    pub fn snapshot(&self) -> MouthSnapshot {
        let frame = self.frames.as_ref().and_then(|f| f.get(self.current_frame));
        MouthSnapshot {
            tick: self.tick_count,
            phase: self.phase,
            frame_index: self.current_frame,
            visual_ref: frame.map(|f| f.visual_ref.clone()),
            secondary_offset: frame.map(|f| f.secondary_offset),
            ring_visible: self.ring_visible,
            dangerous: self.is_dangerous(),
            can_collect: self.can_collect_now(),
            remaining_time: self.remaining_time(),
            finger_inside: self.finger_inside,
            distance: self.last_distance,
            bite_fired: self.bite_event_fired(),
            reason: self.last_reason,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! One play-through: mouth, hand, outcome
//!
//! The round is the only caller of the mouth's commands. Each step applies,
//! in order: zone edge, tick, resting-finger check, forced bite, ring touch.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::core::mouth::MouthStateMachine;
use crate::types::{
    CollectOutcome, FrameInput, FrameTable, HandState, MouthConfig, RoundOutcome, RoundSnapshot,
    ZoneEdge,
};

/// Orchestrates one mouth through to Won or Bitten
#[derive(Debug)]
pub struct Round {
    config: MouthConfig,
    frames: Option<FrameTable>,
    mouth: MouthStateMachine,
    /// Bite listener calls
    bite_events: Arc<AtomicU32>,
    outcome: RoundOutcome,
    hand: HandState,
    finger_in_zone: bool,
    /// Seconds of steps since the round ended
    since_end: f32,
    steps: u64,
    trace: Vec<i32>,
}

impl Round {
    pub fn new(config: MouthConfig, frames: Option<FrameTable>) -> Self {
        let bite_events = Arc::new(AtomicU32::new(0));
        let mouth = Self::build_mouth(&config, frames.clone(), &bite_events);
        Self {
            config,
            frames,
            mouth,
            bite_events,
            outcome: RoundOutcome::Playing,
            hand: HandState::Open,
            finger_in_zone: false,
            since_end: 0.0,
            steps: 0,
            trace: Vec::new(),
        }
    }

    fn build_mouth(config: &MouthConfig, frames: Option<FrameTable>, bite_events: &Arc<AtomicU32>) -> MouthStateMachine {
        let mut mouth = match frames {
            Some(frames) => MouthStateMachine::new(config.clone(), frames),
            None => MouthStateMachine::without_frames(config.clone()),
        };
        let count = Arc::clone(bite_events);
        mouth.on_bite(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
        mouth.init();
        mouth
    }

    /// Apply one step of input
    pub fn step(&mut self, input: &FrameInput) -> RoundSnapshot {
        let was_ended = self.outcome.is_ended();

        if !was_ended {
            match input.zone {
                ZoneEdge::Entered => {
                    self.finger_in_zone = true;
                    self.mouth.finger_entered();
                }
                ZoneEdge::Exited => {
                    self.finger_in_zone = false;
                    self.mouth.finger_exited();
                }
                ZoneEdge::None => {}
            }
        }

        self.mouth.tick(input.dt, input.finger, input.ring);

        if !was_ended {
            if self.finger_in_zone {
                self.mouth.recheck_resting_finger();
            }
            if input.force_bite {
                self.mouth.force_bite();
            }
            if input.ring_touched && self.mouth.attempt_collect() == CollectOutcome::Collected {
                self.finger_in_zone = false;
            }
        }

        self.update_outcome();
        if was_ended && input.dt.is_finite() {
            self.since_end += input.dt.max(0.0);
        }

        self.steps += 1;
        self.trace.push(self.mouth.current_frame());
        self.snapshot()
    }

    fn update_outcome(&mut self) {
        if self.outcome.is_ended() {
            return;
        }
        if self.mouth.is_ring_collected() {
            self.outcome = RoundOutcome::Won;
            self.hand = HandState::WithRing;
            info!(steps = self.steps, "round won");
        } else if self.bite_events() > 0 {
            self.outcome = RoundOutcome::Bitten;
            self.hand = HandState::Cut;
            self.finger_in_zone = false;
            info!(steps = self.steps, "round lost");
        }
    }

    /// Fresh mouth, same config and frames
    pub fn restart(&mut self) -> RoundSnapshot {
        *self = Self::new(self.config.clone(), self.frames.take());
        info!("round restarted");
        self.snapshot()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            step: self.steps,
            outcome: self.outcome,
            hand: self.hand,
            finger_in_zone: self.finger_in_zone,
            retry_prompt_visible: self.retry_prompt_visible(),
            mouth: self.mouth.snapshot(),
        }
    }

    pub fn retry_prompt_visible(&self) -> bool {
        self.outcome.is_ended() && self.since_end >= self.config.retry_prompt_delay
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn hand(&self) -> HandState {
        self.hand
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Times the bite listener has been called for this round
    pub fn bite_events(&self) -> u32 {
        self.bite_events.load(Ordering::SeqCst)
    }

    /// Frame index after every step
    pub fn trace(&self) -> &[i32] {
        &self.trace
    }

    pub fn mouth(&self) -> &MouthStateMachine {
        &self.mouth
    }

    pub fn config(&self) -> &MouthConfig {
        &self.config
    }
}

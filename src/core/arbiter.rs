//! Collection arbiter: decides whether pulling the ring succeeds
//!
//! A failed pull is never neutral: the mouth bites.

use tracing::debug;

use crate::core::mouth::MouthStateMachine;
use crate::types::{CollectOutcome, EligibilityPolicy, MouthConfig, MouthPhase, OpeningCollect};

/// Eligibility policy, copied out of the config at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionArbiter {
    policy: EligibilityPolicy,
    opening: OpeningCollect,
    bite_threshold_offset: i32,
}

impl CollectionArbiter {
    pub fn new(policy: EligibilityPolicy, opening: OpeningCollect, bite_threshold_offset: i32) -> Self {
        Self {
            policy,
            opening,
            bite_threshold_offset,
        }
    }

    pub fn from_config(config: &MouthConfig) -> Self {
        Self::new(config.eligibility, config.opening_collect, config.bite_threshold_frame_offset)
    }

    pub fn policy(&self) -> EligibilityPolicy {
        self.policy
    }

    /// Would a pull succeed right now?
    pub fn can_collect(&self, mouth: &MouthStateMachine) -> bool {
        let Some(frames) = mouth.frames() else {
            return false;
        };
        if mouth.is_resolved() {
            return false;
        }

        let current = mouth.current_frame();
        let above_threshold = current > frames.closed_index() + self.bite_threshold_offset;

        match self.policy {
            EligibilityPolicy::Wide => above_threshold,
            EligibilityPolicy::Narrow => match mouth.phase() {
                MouthPhase::FingerInsideCounting => mouth.remaining_time() > 0.0,
                MouthPhase::AlertOpening => match self.opening {
                    OpeningCollect::Always => true,
                    OpeningCollect::AboveBiteThreshold => above_threshold,
                },
                MouthPhase::Idle => current >= frames.open_index(),
                MouthPhase::AlertClosing | MouthPhase::BiteChomping | MouthPhase::RingCollected => false,
            },
        }
    }

    /// Collect if eligible, otherwise bite.
    ///
    /// Once the round is resolved the call changes nothing: a collected ring
    /// stays `Collected`, a committed bite stays `Rejected`.
    pub fn attempt_collect(&self, mouth: &mut MouthStateMachine) -> CollectOutcome {
        if mouth.is_ring_collected() {
            return CollectOutcome::Collected;
        }
        if mouth.is_bite_triggered() || mouth.frames().is_none() {
            return CollectOutcome::Rejected;
        }

        if self.can_collect(mouth) {
            mouth.commit_collection();
            CollectOutcome::Collected
        } else {
            debug!(phase = %mouth.phase(), frame = mouth.current_frame(), "collection rejected");
            mouth.reject_collection();
            CollectOutcome::Rejected
        }
    }
}

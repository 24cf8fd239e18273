//! Integration tests for ring collection
//!
//! A pull either collects or bites, never both, and the decision depends on
//! the eligibility policy.

use glam::Vec2;
use pretty_assertions::assert_eq;

use ringbite::core::{CollectionArbiter, MouthStateMachine};
use ringbite::types::{
    CollectOutcome, EligibilityPolicy, FrameTable, MouthConfig, MouthPhase, OpeningCollect, ReasonCode,
};

const RING: Vec2 = Vec2::ZERO;
const NEAR: Vec2 = Vec2::new(1.0, 0.0);
const FAR: Vec2 = Vec2::new(10.0, 0.0);

fn mouth(config: MouthConfig) -> MouthStateMachine {
    let mut mouth = MouthStateMachine::new(config, FrameTable::uniform(6).unwrap());
    mouth.init();
    mouth
}

#[test]
fn test_collect_during_countdown() {
    let mut mouth = mouth(MouthConfig::default());
    mouth.finger_entered();
    mouth.tick(1.5, NEAR, RING);

    assert_eq!(mouth.attempt_collect(), CollectOutcome::Collected);
    assert_eq!(mouth.phase(), MouthPhase::RingCollected);
    assert_eq!(mouth.current_frame(), 5);
    assert!(!mouth.is_finger_inside());
    assert!(!mouth.bite_event_fired());
    assert!(!mouth.is_dangerous());
}

#[test]
fn test_rejected_pull_bites_and_fires() {
    let mut mouth = mouth(MouthConfig::default());
    mouth.tick(0.0, NEAR, RING);
    mouth.tick(0.5, NEAR, RING);

    assert_eq!(mouth.attempt_collect(), CollectOutcome::Rejected);
    assert_eq!(mouth.last_reason(), ReasonCode::R005_COLLECT_REJECTED);
    assert!(mouth.last_reason().starts_bite());

    for _ in 0..5 {
        mouth.tick(0.1, NEAR, RING);
    }
    assert!(mouth.bite_event_fired());
    assert_eq!(mouth.attempt_collect(), CollectOutcome::Rejected);
    assert!(!mouth.is_ring_collected());
}

#[test]
fn test_policies_disagree_while_closing() {
    let narrow = CollectionArbiter::new(EligibilityPolicy::Narrow, OpeningCollect::Always, 1);
    let wide = CollectionArbiter::new(EligibilityPolicy::Wide, OpeningCollect::Always, 1);

    let mut mouth = mouth(MouthConfig::default());
    mouth.tick(0.0, NEAR, RING);
    mouth.tick(0.25, NEAR, RING);
    assert_eq!(mouth.current_frame(), 4);

    assert!(!narrow.can_collect(&mouth));
    assert!(wide.can_collect(&mouth));
    assert_eq!(wide.policy(), EligibilityPolicy::Wide);
}

#[test]
fn test_wide_threshold_boundary() {
    let config = MouthConfig {
        alert_close_duration: 1.0,
        ..MouthConfig::default()
    }
    .with_eligibility(EligibilityPolicy::Wide);
    let mut mouth = mouth(config);
    mouth.tick(0.0, NEAR, RING);

    mouth.tick(0.75, NEAR, RING);
    // 5 -> 0 at 0.75 is frame 1: closed + offset, not above it
    assert_eq!(mouth.current_frame(), 1);
    assert!(!mouth.can_collect_now());
}

#[test]
fn test_narrow_opening_collects_even_when_shut() {
    let mut mouth = mouth(MouthConfig::default());
    mouth.tick(0.0, NEAR, RING);
    mouth.tick(10.0, NEAR, RING);
    mouth.tick(0.0, FAR, RING);
    assert_eq!(mouth.phase(), MouthPhase::AlertOpening);
    assert_eq!(mouth.attempt_collect(), CollectOutcome::Collected);
}

#[test]
fn test_snapshot_reports_eligibility() {
    let mut mouth = mouth(MouthConfig::default());
    assert!(mouth.snapshot().can_collect);
    let snap = mouth.tick(0.0, NEAR, RING);
    assert!(!snap.can_collect);
}

#[test]
fn test_pull_during_bite_changes_nothing() {
    let mut mouth = mouth(MouthConfig::default());
    let fired = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let f = std::sync::Arc::clone(&fired);
    mouth.on_bite(move || {
        f.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    mouth.force_bite();
    let before = mouth.snapshot();
    assert_eq!(mouth.attempt_collect(), CollectOutcome::Rejected);
    assert_eq!(mouth.snapshot(), before);

    for _ in 0..5 {
        mouth.tick(0.1, NEAR, RING);
        mouth.attempt_collect();
    }
    assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 1);
}

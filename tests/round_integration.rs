//! Integration tests for rounds
//!
//! Input ordering within a step, outcome, hand state and the retry prompt.

use glam::Vec2;
use pretty_assertions::assert_eq;

use ringbite::core::Round;
use ringbite::types::{FrameInput, FrameTable, HandState, MouthConfig, MouthPhase, RoundOutcome, ZoneEdge};

const RING: Vec2 = Vec2::ZERO;
const NEAR: Vec2 = Vec2::new(1.0, 0.0);

fn round(config: MouthConfig) -> Round {
    Round::new(config, Some(FrameTable::uniform(6).unwrap()))
}

#[test]
fn test_reach_in_and_pull_out() {
    let mut round = round(MouthConfig::default());
    let snap = round.step(&FrameInput::at(0.1, NEAR, RING).with_zone(ZoneEdge::Entered));
    assert_eq!(snap.mouth.phase, MouthPhase::FingerInsideCounting);
    assert!(snap.finger_in_zone);

    round.step(&FrameInput::at(0.5, NEAR, RING));
    let snap = round.step(&FrameInput::at(0.1, NEAR, RING).touching_ring());
    assert_eq!(snap.outcome, RoundOutcome::Won);
    assert_eq!(snap.hand, HandState::WithRing);
    assert!(!snap.finger_in_zone);
}

#[test]
fn test_lingering_too_long_loses() {
    let mut round = round(MouthConfig::default());
    round.step(&FrameInput::at(0.0, NEAR, RING).with_zone(ZoneEdge::Entered));
    for _ in 0..12 {
        round.step(&FrameInput::at(0.25, NEAR, RING));
    }
    let snap = round.snapshot();
    assert_eq!(snap.outcome, RoundOutcome::Bitten);
    assert_eq!(snap.hand, HandState::Cut);
    assert!(snap.mouth.bite_fired);
}

#[test]
fn test_resting_in_proximity_mode_bites_when_dangerous() {
    let config = MouthConfig {
        alert_close_duration: 1.0,
        ..MouthConfig::default()
    }
    .with_bite_mode(ringbite::types::BiteMode::Proximity);
    let mut round = round(config);
    round.step(&FrameInput::at(0.0, NEAR, RING));
    round.step(&FrameInput::at(0.25, NEAR, RING).with_zone(ZoneEdge::Entered));
    assert_eq!(round.mouth().phase(), MouthPhase::AlertClosing);

    round.step(&FrameInput::at(0.25, NEAR, RING));
    assert_eq!(round.mouth().phase(), MouthPhase::AlertClosing);
    round.step(&FrameInput::at(0.25, NEAR, RING));
    assert_eq!(round.mouth().phase(), MouthPhase::BiteChomping);
}

#[test]
fn test_bite_beats_touch_in_same_step() {
    let mut round = round(MouthConfig::default());
    let snap = round.step(&FrameInput::at(0.0, NEAR, RING).forcing_bite().touching_ring());
    assert_eq!(snap.mouth.phase, MouthPhase::BiteChomping);
    assert!(!round.mouth().is_ring_collected());
}

#[test]
fn test_animation_finishes_after_round_ends() {
    let mut round = round(MouthConfig::default());
    round.step(&FrameInput::at(0.0, NEAR, RING).forcing_bite());
    let trace_len_before = round.trace().len();
    for _ in 0..3 {
        round.step(&FrameInput::at(0.1, NEAR, RING).with_zone(ZoneEdge::Entered));
    }
    assert_eq!(round.outcome(), RoundOutcome::Bitten);
    assert_eq!(round.trace().len(), trace_len_before + 3);
    assert_eq!(*round.trace().last().unwrap(), 0);
    assert!(!round.snapshot().finger_in_zone);
}

#[test]
fn test_retry_prompt_waits_for_delay() {
    let config = MouthConfig {
        retry_prompt_delay: 1.0,
        ..MouthConfig::default()
    };
    let mut round = round(config);
    round.step(&FrameInput::default().touching_ring());
    let snap = round.step(&FrameInput::at(0.5, NEAR, RING));
    assert!(!snap.retry_prompt_visible);
    let snap = round.step(&FrameInput::at(0.5, NEAR, RING));
    assert!(snap.retry_prompt_visible);

    let snap = round.restart();
    assert!(!snap.retry_prompt_visible);
    assert_eq!(snap.outcome, RoundOutcome::Playing);
}

#[test]
fn test_round_without_frames_never_ends() {
    let mut round = Round::new(MouthConfig::default(), None);
    for _ in 0..5 {
        round.step(&FrameInput::at(0.5, NEAR, RING).with_zone(ZoneEdge::Entered).forcing_bite());
    }
    assert_eq!(round.outcome(), RoundOutcome::Playing);
    assert_eq!(round.trace(), &[-1, -1, -1, -1, -1]);
}

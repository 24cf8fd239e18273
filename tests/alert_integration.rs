//! Integration tests for the alert zone
//!
//! Approach closes the mouth, backing off reopens it, never with a jump.

use glam::Vec2;
use ringbite::core::MouthStateMachine;
use ringbite::types::{FrameTable, MouthConfig, MouthPhase, ReasonCode};

const RING: Vec2 = Vec2::ZERO;
const NEAR: Vec2 = Vec2::new(2.0, 0.0);
const FAR: Vec2 = Vec2::new(3.0, 0.0);

fn mouth(config: MouthConfig) -> MouthStateMachine {
    let mut mouth = MouthStateMachine::new(config, FrameTable::uniform(6).unwrap());
    mouth.init();
    mouth
}

#[test]
fn test_threshold_is_inclusive() {
    let mut mouth = mouth(MouthConfig::default());
    let snap = mouth.tick(0.1, Vec2::new(2.5, 0.0), RING);
    assert_eq!(snap.phase, MouthPhase::AlertClosing);
}

#[test]
fn test_just_outside_threshold_stays_idle() {
    let mut mouth = mouth(MouthConfig::default());
    let snap = mouth.tick(0.1, FAR, RING);
    assert_eq!(snap.phase, MouthPhase::Idle);
    assert_eq!(snap.distance, Some(3.0));
}

#[test]
fn test_full_close_then_hold() {
    let config = MouthConfig {
        alert_close_duration: 1.0,
        ..MouthConfig::default()
    };
    let mut mouth = mouth(config);
    mouth.tick(0.0, NEAR, RING);

    let mut frames = Vec::new();
    for _ in 0..4 {
        frames.push(mouth.tick(0.25, NEAR, RING).frame_index);
    }
    assert_eq!(frames, vec![4, 3, 1, 0]);
    assert_eq!(mouth.last_reason(), ReasonCode::R002_ALERT_CLOSED_HOLD);

    let snap = mouth.tick(1.0, NEAR, RING);
    assert_eq!(snap.phase, MouthPhase::AlertClosing);
    assert_eq!(snap.frame_index, 0);
    assert!(snap.dangerous);
}

#[test]
fn test_frames_never_jump_on_direction_change() {
    let config = MouthConfig {
        alert_close_duration: 1.0,
        alert_open_duration: 1.0,
        ..MouthConfig::default()
    };
    let mut mouth = mouth(config);
    let mut last = mouth.current_frame();
    let path = [NEAR, NEAR, NEAR, FAR, FAR, NEAR, NEAR, FAR, FAR, FAR, FAR, FAR];

    for finger in path {
        let snap = mouth.tick(0.125, finger, RING);
        assert!((snap.frame_index - last).abs() <= 1, "jump {} -> {}", last, snap.frame_index);
        last = snap.frame_index;
    }
}

#[test]
fn test_reopen_reaches_idle_open() {
    let mut mouth = mouth(MouthConfig::default());
    mouth.tick(0.0, NEAR, RING);
    mouth.tick(0.5, NEAR, RING);
    mouth.tick(0.0, FAR, RING);
    for _ in 0..10 {
        mouth.tick(0.1, FAR, RING);
    }
    assert_eq!(mouth.phase(), MouthPhase::Idle);
    assert_eq!(mouth.current_frame(), 5);
    assert!(mouth.ring_visible());
}

#[test]
fn test_zero_durations_do_not_divide_by_zero() {
    let config = MouthConfig {
        alert_close_duration: 0.0,
        alert_open_duration: 0.0,
        ..MouthConfig::default()
    };
    let mut mouth = mouth(config);
    mouth.tick(0.0, NEAR, RING);
    let snap = mouth.tick(0.0, NEAR, RING);
    assert_eq!(snap.frame_index, 5);
    let snap = mouth.tick(0.02, NEAR, RING);
    assert_eq!(snap.frame_index, 0);
}

#[test]
fn test_entry_tick_spends_its_dt_on_the_close() {
    let config = MouthConfig {
        alert_close_duration: 1.0,
        ..MouthConfig::default()
    };
    let mut mouth = mouth(config);

    let snap = mouth.tick(0.5, NEAR, RING);
    assert_eq!(snap.reason, ReasonCode::R002_ALERT_CLOSING_STARTED);
    assert_eq!(snap.frame_index, 3);

    let snap = mouth.tick(0.5, NEAR, RING);
    assert_eq!(snap.frame_index, 0);
    assert_eq!(snap.reason, ReasonCode::R002_ALERT_CLOSED_HOLD);
}

#[test]
fn test_resumed_close_spends_its_dt() {
    let config = MouthConfig {
        alert_close_duration: 1.0,
        alert_open_duration: 1.0,
        ..MouthConfig::default()
    };
    let mut mouth = mouth(config);
    mouth.tick(0.0, NEAR, RING);
    mouth.tick(0.6, NEAR, RING);
    mouth.tick(0.0, FAR, RING);
    assert_eq!(mouth.current_frame(), 2);

    // 2 -> 0 at 0.5 is frame 1
    let snap = mouth.tick(0.5, NEAR, RING);
    assert_eq!(snap.reason, ReasonCode::R002_ALERT_CLOSING_RESUMED);
    assert_eq!(snap.phase, MouthPhase::AlertClosing);
    assert_eq!(snap.frame_index, 1);
}

#[test]
fn test_one_long_tick_closes_on_a_resting_finger() {
    let config = MouthConfig::default().with_bite_mode(ringbite::types::BiteMode::Proximity);
    let mut mouth = mouth(config);
    mouth.finger_entered();
    assert!(mouth.is_finger_inside());

    let snap = mouth.tick(5.0, NEAR, RING);
    assert_eq!(snap.reason, ReasonCode::R004_BITE_ALERT_CLOSED_ON_FINGER);
    assert_eq!(snap.phase, MouthPhase::BiteChomping);
}

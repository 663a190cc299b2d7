//! Sprite motion interpolator properties.

use critters::core::{Motion, MotionConfig, MotionState};
use critters::types::{Vec2, MAX_STEP, MOTION_EPSILON};

#[test]
fn walks_forty_units_in_eight_ticks() {
    let mut m = Motion::new(Vec2::new(400.0, 400.0));
    m.set_target(Vec2::new(440.0, 400.0));
    assert_eq!(m.state(), MotionState::Moving);

    for i in 1..=7 {
        assert_eq!(m.tick(), MotionState::Moving);
        assert_eq!(m.current(), Vec2::new(400.0 + 5.0 * i as f32, 400.0));
    }
    assert_eq!(m.tick(), MotionState::Settled);
    assert_eq!(m.current(), Vec2::new(440.0, 400.0));
}

#[test]
fn distance_never_grows_and_steps_are_bounded() {
    let targets = [
        Vec2::new(0.0, 0.0),
        Vec2::new(800.0, 3.0),
        Vec2::new(123.4, 567.8),
        Vec2::new(401.0, 400.5),
    ];
    for target in targets {
        let mut m = Motion::new(Vec2::new(400.0, 400.0));
        m.set_target(target);
        let mut prev = m.current();
        for _ in 0..1000 {
            let before = m.distance();
            m.tick();
            assert!(m.distance() <= before);
            assert!(prev.distance(m.current()) <= MAX_STEP + 1e-3);
            prev = m.current();
            if m.is_settled() {
                break;
            }
        }
        assert!(m.is_settled());
        assert_eq!(m.current(), target);
    }
}

#[test]
fn short_hop_snaps_in_one_tick() {
    let mut m = Motion::new(Vec2::new(10.0, 10.0));
    m.set_target(Vec2::new(13.0, 10.0));
    assert_eq!(m.tick(), MotionState::Settled);
    assert_eq!(m.current(), Vec2::new(13.0, 10.0));
}

#[test]
fn sub_epsilon_retarget_while_settled_leaves_current() {
    let mut m = Motion::new(Vec2::new(10.0, 10.0));
    m.set_target(Vec2::new(10.0 + MOTION_EPSILON / 2.0, 10.0));
    assert!(m.is_settled());
    assert_eq!(m.current(), Vec2::new(10.0, 10.0));
}

#[test]
fn retarget_at_exactly_epsilon_moves_and_lands_in_one_tick() {
    let mut m = Motion::new(Vec2::new(10.0, 10.0));
    m.set_target(Vec2::new(11.0, 10.0));
    assert_eq!(m.state(), MotionState::Moving);
    assert_eq!(m.tick(), MotionState::Settled);
    assert_eq!(m.current(), Vec2::new(11.0, 10.0));
}

#[test]
fn retarget_just_under_epsilon_stays_settled() {
    let mut m = Motion::new(Vec2::new(10.0, 10.0));
    m.set_target(Vec2::new(10.999, 10.0));
    assert_eq!(m.state(), MotionState::Settled);
    assert_eq!(m.current(), Vec2::new(10.0, 10.0));
}

#[test]
fn sub_epsilon_retarget_while_moving_keeps_moving() {
    let mut m = Motion::new(Vec2::new(0.0, 0.0));
    m.set_target(Vec2::new(100.0, 0.0));
    for _ in 0..19 {
        m.tick();
    }
    // current is at 95; retarget to within epsilon of it
    m.set_target(Vec2::new(95.5, 0.0));
    assert_eq!(m.state(), MotionState::Moving);
    assert_eq!(m.tick(), MotionState::Settled);
    assert_eq!(m.current(), Vec2::new(95.5, 0.0));
}

#[test]
fn settled_tick_is_a_noop() {
    let mut m = Motion::new(Vec2::new(5.0, 6.0));
    assert_eq!(m.tick(), MotionState::Settled);
    assert_eq!(m.current(), Vec2::new(5.0, 6.0));
}

#[test]
fn settled_to_moving_when_target_moves_away() {
    let mut m = Motion::new(Vec2::new(5.0, 6.0));
    m.set_target(Vec2::new(5.0, 60.0));
    assert_eq!(m.state(), MotionState::Moving);
}

#[test]
fn custom_step_size() {
    let config = MotionConfig {
        max_step: 10.0,
        epsilon: 1.0,
    };
    let mut m = Motion::with_config(Vec2::ZERO, config);
    m.set_target(Vec2::new(0.0, 30.0));
    m.tick();
    assert_eq!(m.current(), Vec2::new(0.0, 10.0));
}

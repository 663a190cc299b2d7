//! Sprite motion interpolator
//!
//! Each sprite owns a [`Motion`]: the position it is drawn at (`current`) and
//! the position it is heading to (`target`). Every tick moves `current` toward
//! `target` by at most `max_step`, so distance to the target never grows and
//! the sprite never overshoots. Once closer than `epsilon`, `current` snaps
//! exactly onto `target` and the motion settles.

use crate::types::{Vec2, MAX_STEP, MOTION_EPSILON};

/// Whether a sprite still has distance to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Moving,
    Settled,
}

/// Per-tick easing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Maximum displacement per tick.
    pub max_step: f32,
    /// Snap distance.
    pub epsilon: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_step: MAX_STEP,
            epsilon: MOTION_EPSILON,
        }
    }
}

/// Current/target position pair of one sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    current: Vec2,
    target: Vec2,
    state: MotionState,
    config: MotionConfig,
}

impl Motion {
    /// A settled motion resting at `at`.
    pub fn new(at: Vec2) -> Self {
        Self::with_config(at, MotionConfig::default())
    }

    pub fn with_config(at: Vec2, config: MotionConfig) -> Self {
        Self {
            current: at,
            target: at,
            state: MotionState::Settled,
            config,
        }
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.state == MotionState::Settled
    }

    pub fn config(&self) -> MotionConfig {
        self.config
    }

    /// Remaining distance to the target.
    pub fn distance(&self) -> f32 {
        self.current.distance(self.target)
    }

    /// Point the sprite at a new target.
    ///
    /// A target at least `epsilon` away puts the motion in `Moving`. A closer
    /// target leaves the state alone. `current` is only ever moved by
    /// [`Motion::tick`].
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
        if self.distance() >= self.config.epsilon {
            self.state = MotionState::Moving;
        }
    }

    /// Place the sprite at `at` with no pending movement.
    pub fn teleport(&mut self, at: Vec2) {
        self.current = at;
        self.target = at;
        self.state = MotionState::Settled;
    }

    /// Advance one animation frame. Returns the state after the tick.
    pub fn tick(&mut self) -> MotionState {
        if self.state == MotionState::Settled {
            return self.state;
        }

        let delta = self.target - self.current;
        let distance = delta.length();
        if distance < self.config.epsilon {
            self.settle();
            return self.state;
        }

        let step = self.config.max_step.min(distance);
        self.current = self.current + delta * (step / distance);

        if self.distance() < self.config.epsilon {
            self.settle();
        }
        self.state
    }

    fn settle(&mut self) {
        self.current = self.target;
        self.state = MotionState::Settled;
    }
}

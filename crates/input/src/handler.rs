//! Held-key movement repeat for terminal environments.
//!
//! A press moves once; holding the key repeats after a delay at a fixed rate.
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Instant;

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::map::direction_for;
use crate::types::{AppAction, Direction, MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_MS};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks the held movement key.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Option<Direction>,
    last_key_time: Instant,
    delay_timer: u32,
    repeat_accumulator: u32,
    repeat_delay: u32,
    repeat_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_rate: u32) -> Self {
        Self {
            held: None,
            last_key_time: Instant::now(),
            delay_timer: 0,
            repeat_accumulator: 0,
            repeat_delay,
            repeat_rate: repeat_rate.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    /// Register a key press. Returns the immediate move for a newly held key.
    ///
    /// Terminal auto-repeat presses of the held key only refresh the release
    /// timeout; repeats come from [`update`](Self::update).
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<AppAction> {
        let dir = direction_for(code)?;
        self.last_key_time = Instant::now();
        if self.held == Some(dir) {
            return None;
        }
        self.held = Some(dir);
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
        Some(AppAction::Move(dir))
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if direction_for(code).is_some_and(|d| self.held == Some(d)) {
            self.release();
        }
    }

    /// Advance timers by `elapsed_ms` and return repeated moves.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<AppAction, 16> {
        let mut actions = ArrayVec::<AppAction, 16>::new();

        // Auto-release when terminal does not emit release events.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            self.release();
        }

        let Some(dir) = self.held else {
            return actions;
        };

        let prev = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer >= self.repeat_delay {
            let excess = if prev < self.repeat_delay {
                self.delay_timer - self.repeat_delay
            } else {
                elapsed_ms
            };
            self.repeat_accumulator += excess;
            while self.repeat_accumulator >= self.repeat_rate {
                let _ = actions.try_push(AppAction::Move(dir));
                self.repeat_accumulator -= self.repeat_rate;
            }
        }

        actions
    }

    fn release(&mut self) {
        self.held = None;
        self.delay_timer = 0;
        self.repeat_accumulator = 0;
    }

    pub fn reset(&mut self) {
        self.release();
        self.last_key_time = Instant::now();
    }

    #[cfg(test)]
    fn age_last_key(&mut self, by: std::time::Duration) {
        self.last_key_time = Instant::now() - by;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

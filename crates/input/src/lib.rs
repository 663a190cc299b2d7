//! Terminal input module (app-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::AppAction`], repeats held
//! movement keys (including on terminals without key-release events), and
//! collects text for the hex codepoint prompt.

pub mod entry;
pub mod handler;
pub mod map;

pub use critters_types as types;

pub use entry::{EntryEvent, HexEntry};
pub use handler::InputHandler;
pub use map::{direction_for, handle_key_event, should_quit};

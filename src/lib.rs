//! Critters (workspace facade crate).
//!
//! A terminal map of emoji creatures. The implementation lives in dedicated
//! crates under `crates/`; this package re-exports them as
//! `critters::{core,input,term,types}` and adds the app layer used by the
//! binary.

pub use critters_core as core;
pub use critters_input as input;
pub use critters_term as term;
pub use critters_types as types;

pub mod app;
pub mod config;
pub mod logging;
pub mod world_file;

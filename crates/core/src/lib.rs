//! Core logic module - pure, deterministic, and testable
//!
//! This crate holds everything the app computes, with **no dependencies** on
//! the terminal, input devices or the filesystem:
//!
//! - **Deterministic**: the same inputs always give the same sequences and positions
//! - **Testable**: every rule below has unit tests next to it
//! - **Portable**: usable from the terminal app, a headless test or another host
//!
//! # Module Structure
//!
//! - [`emoji`]: hex parsing, skin-tone placement, asset keys and display text
//! - [`catalog`]: built-in emoji picker table
//! - [`motion`]: bounded per-tick easing of a sprite toward its target
//! - [`world`]: explicit store of all creatures on the map
//! - [`scheduler`]: per-frame tick driver with cancelable subscriptions
//! - [`camera`]: view box that follows the player and stays inside the map
//! - [`snapshot`]: JSON world snapshots in, render snapshots out
//!
//! # Example
//!
//! ```
//! use critters_core::emoji::{apply_skin_tone, parse_hex, to_asset_key};
//! use critters_core::{FrameScheduler, WorldState, PLAYER_ID};
//! use critters_types::{AssetKeyStyle, SkinTone, Vec2};
//!
//! // Resolve an avatar
//! let base = parse_hex("1f469-200d-1f4bb").unwrap();
//! let avatar = apply_skin_tone(&base, Some(SkinTone::Medium));
//! assert_eq!(to_asset_key(&avatar, AssetKeyStyle::Hyphenated), "1f469-1f3fd-200d-1f4bb");
//!
//! // Put it on the map and walk right
//! let mut world = WorldState::default();
//! world.insert(PLAYER_ID, "me", avatar, None, Vec2::new(400.0, 400.0));
//! world.set_target(PLAYER_ID, Vec2::new(440.0, 400.0)).unwrap();
//!
//! let mut frames = FrameScheduler::new();
//! let _sprite = frames.subscribe(PLAYER_ID);
//! for _ in 0..8 {
//!     frames.tick(&mut world);
//! }
//! assert_eq!(world.get(PLAYER_ID).unwrap().motion.current(), Vec2::new(440.0, 400.0));
//! ```
//!
//! # Timing
//!
//! Motion is frame-based, not time-based: each tick moves a sprite at most
//! `MAX_STEP` world units. The app ticks once per frame (`TICK_MS`).

pub mod camera;
pub mod catalog;
pub mod emoji;
pub mod motion;
pub mod scheduler;
pub mod snapshot;
pub mod world;

pub use critters_types as types;

// Re-export commonly used types for convenience
pub use camera::{Camera, ViewBox};
pub use catalog::{Catalog, CatalogEntry};
pub use emoji::{AssetSource, CodepointSequence, ParseError};
pub use motion::{Motion, MotionConfig, MotionState};
pub use scheduler::{FrameScheduler, FrameSubscription, TickReport};
pub use snapshot::{CreatureRecord, RenderSnapshot, SpriteSnapshot, WorldSnapshot};
pub use world::{Creature, SnapshotChanges, WorldError, WorldState, PLAYER_ID};

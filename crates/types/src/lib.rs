//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, so they can be used by the core
//! logic, the terminal renderer and the input layer alike.
//!
//! # Map Geometry
//!
//! The world is a square map measured in abstract world units:
//!
//! - **Size**: 800 x 800 units (indexed from the top-left corner)
//! - **Spawn position**: the map centre, (400, 400)
//!
//! # Timing and Motion Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS) |
//! | `MOTION_EPSILON` | 1.0 | Distance below which a sprite settles |
//! | `MAX_STEP` | 5.0 | Maximum displacement per tick |
//! | `MOVE_STEP` | 40.0 | Target displacement per movement key press |
//! | `MOVE_REPEAT_DELAY_MS` | 150 | Hold time before a movement key repeats |
//! | `MOVE_REPEAT_MS` | 80 | Repeat interval of a held movement key |
//! | `STATIC_RENDER_INTERVAL_MS` | 250 | Redraw interval when nothing moves |
//!
//! # Emoji Codepoints
//!
//! - `ZWJ` (U+200D) joins adjacent codepoints into one glyph cluster
//! - `VS16` (U+FE0F) requests emoji presentation of the preceding codepoint
//! - Skin-tone modifiers occupy the contiguous range U+1F3FB..=U+1F3FF
//!
//! # Examples
//!
//! ```
//! use critters_types::{SkinTone, AppAction, Direction, Vec2, MAP_SIZE};
//!
//! // Skin tones map to their reserved codepoints
//! assert_eq!(SkinTone::Medium.codepoint(), 0x1F3FD);
//! assert_eq!(SkinTone::from_codepoint(0x1F3FB), Some(SkinTone::Light));
//! assert_eq!(SkinTone::from_codepoint(0x1F600), None);
//!
//! // Parse an app action
//! let action = AppAction::from_str("moveUp").unwrap();
//! assert_eq!(action, AppAction::Move(Direction::Up));
//!
//! // Geometry
//! let p = Vec2::new(900.0, -5.0).clamp_to(MAP_SIZE);
//! assert_eq!(p, Vec2::new(800.0, 0.0));
//! ```

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Side length of the square world map, in world units.
pub const MAP_SIZE: f32 = 800.0;

/// Frame interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Distance (world units) below which a moving sprite snaps to its target.
pub const MOTION_EPSILON: f32 = 1.0;

/// Maximum displacement of a sprite per tick (world units).
pub const MAX_STEP: f32 = 5.0;

/// Target displacement applied by a single movement key press.
pub const MOVE_STEP: f32 = 40.0;

/// Hold time before a held movement key starts repeating.
pub const MOVE_REPEAT_DELAY_MS: u32 = 150;

/// Interval between repeats of a held movement key.
pub const MOVE_REPEAT_MS: u32 = 80;

/// Redraw interval for frames where nothing is moving.
pub const STATIC_RENDER_INTERVAL_MS: u64 = 250;

/// Zero-width joiner.
pub const ZWJ: u32 = 0x200D;

/// Variation selector-16 (emoji presentation).
pub const VS16: u32 = 0xFE0F;

/// First skin-tone modifier codepoint (Fitzpatrick type 1-2).
pub const SKIN_TONE_FIRST: u32 = 0x1F3FB;

/// Last skin-tone modifier codepoint (Fitzpatrick type 6).
pub const SKIN_TONE_LAST: u32 = 0x1F3FF;

/// Returns true when `cp` is one of the five skin-tone modifiers.
#[inline]
pub fn is_skin_tone(cp: u32) -> bool {
    (SKIN_TONE_FIRST..=SKIN_TONE_LAST).contains(&cp)
}


/// Stable identifier of a creature in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point or displacement in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Clamp both coordinates into `0..=size`.
    pub fn clamp_to(self, size: f32) -> Self {
        Self {
            x: self.x.clamp(0.0, size),
            y: self.y.clamp(0.0, size),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// The five Unicode skin-tone modifiers (Fitzpatrick scale)
///
/// "No tone" is expressed as `Option::<SkinTone>::None` throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    /// U+1F3FB
    Light,
    /// U+1F3FC
    MediumLight,
    /// U+1F3FD
    Medium,
    /// U+1F3FE
    MediumDark,
    /// U+1F3FF
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 5] = [
        SkinTone::Light,
        SkinTone::MediumLight,
        SkinTone::Medium,
        SkinTone::MediumDark,
        SkinTone::Dark,
    ];

    /// Modifier codepoint for this tone.
    pub fn codepoint(self) -> u32 {
        match self {
            SkinTone::Light => 0x1F3FB,
            SkinTone::MediumLight => 0x1F3FC,
            SkinTone::Medium => 0x1F3FD,
            SkinTone::MediumDark => 0x1F3FE,
            SkinTone::Dark => 0x1F3FF,
        }
    }

    /// Tone for a modifier codepoint; anything outside the modifier range is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use critters_types::SkinTone;
    ///
    /// assert_eq!(SkinTone::from_codepoint(0x1F3FF), Some(SkinTone::Dark));
    /// assert_eq!(SkinTone::from_codepoint(0x1F3FA), None);
    /// ```
    pub fn from_codepoint(cp: u32) -> Option<Self> {
        match cp {
            0x1F3FB => Some(SkinTone::Light),
            0x1F3FC => Some(SkinTone::MediumLight),
            0x1F3FD => Some(SkinTone::Medium),
            0x1F3FE => Some(SkinTone::MediumDark),
            0x1F3FF => Some(SkinTone::Dark),
            _ => None,
        }
    }

    /// Parse a tone name (case-insensitive) or its 1-based index.
    ///
    /// Accepts "light" | "1", "medium-light" | "2", "medium" | "3",
    /// "medium-dark" | "4", "dark" | "5".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" | "1" => Some(SkinTone::Light),
            "medium-light" | "2" => Some(SkinTone::MediumLight),
            "medium" | "3" => Some(SkinTone::Medium),
            "medium-dark" | "4" => Some(SkinTone::MediumDark),
            "dark" | "5" => Some(SkinTone::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Light => "light",
            SkinTone::MediumLight => "medium-light",
            SkinTone::Medium => "medium",
            SkinTone::MediumDark => "medium-dark",
            SkinTone::Dark => "dark",
        }
    }

    /// Advance through none → light → ... → dark → none.
    pub fn cycle(current: Option<SkinTone>) -> Option<SkinTone> {
        match current {
            None => Some(SkinTone::Light),
            Some(SkinTone::Light) => Some(SkinTone::MediumLight),
            Some(SkinTone::MediumLight) => Some(SkinTone::Medium),
            Some(SkinTone::Medium) => Some(SkinTone::MediumDark),
            Some(SkinTone::MediumDark) => Some(SkinTone::Dark),
            Some(SkinTone::Dark) => None,
        }
    }
}

/// How codepoints are joined when building an art-asset lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetKeyStyle {
    /// `1f469-1f3fd-200d-1f4bb`
    #[default]
    Hyphenated,
    /// `1f469_1f3fd_200d_1f4bb`
    Underscored,
}

impl AssetKeyStyle {
    pub fn separator(self) -> char {
        match self {
            AssetKeyStyle::Hyphenated => '-',
            AssetKeyStyle::Underscored => '_',
        }
    }
}

/// Cardinal movement direction on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement in world space (y grows downwards).
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Actions the user can apply to the app
///
/// Produced by the key map and consumed by the app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nudge the player's target one `MOVE_STEP` in a direction
    Move(Direction),
    /// Select the next catalog emoji as avatar
    NextEmoji,
    /// Select the previous catalog emoji as avatar
    PrevEmoji,
    /// Advance the skin tone (wrapping through "none")
    CycleTone,
    /// Remove the skin tone
    ClearTone,
    /// Open the hex codepoint entry prompt
    BeginHexEntry,
    /// Toggle the asset key style shown in the side panel
    ToggleKeyStyle,
    /// Pause or resume animation
    TogglePause,
    /// Leave the app
    Quit,
}

impl AppAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use critters_types::{AppAction, Direction};
    ///
    /// assert_eq!(AppAction::from_str("cycleTone"), Some(AppAction::CycleTone));
    /// assert_eq!(AppAction::from_str("MOVELEFT"), Some(AppAction::Move(Direction::Left)));
    /// assert_eq!(AppAction::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(AppAction::Move(Direction::Up)),
            "movedown" => Some(AppAction::Move(Direction::Down)),
            "moveleft" => Some(AppAction::Move(Direction::Left)),
            "moveright" => Some(AppAction::Move(Direction::Right)),
            "nextemoji" => Some(AppAction::NextEmoji),
            "prevemoji" => Some(AppAction::PrevEmoji),
            "cycletone" => Some(AppAction::CycleTone),
            "cleartone" => Some(AppAction::ClearTone),
            "beginhexentry" => Some(AppAction::BeginHexEntry),
            "togglekeystyle" => Some(AppAction::ToggleKeyStyle),
            "togglepause" => Some(AppAction::TogglePause),
            "quit" => Some(AppAction::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppAction::Move(Direction::Up) => "moveUp",
            AppAction::Move(Direction::Down) => "moveDown",
            AppAction::Move(Direction::Left) => "moveLeft",
            AppAction::Move(Direction::Right) => "moveRight",
            AppAction::NextEmoji => "nextEmoji",
            AppAction::PrevEmoji => "prevEmoji",
            AppAction::CycleTone => "cycleTone",
            AppAction::ClearTone => "clearTone",
            AppAction::BeginHexEntry => "beginHexEntry",
            AppAction::ToggleKeyStyle => "toggleKeyStyle",
            AppAction::TogglePause => "togglePause",
            AppAction::Quit => "quit",
        }
    }
}

//! World snapshots.
//!
//! [`WorldSnapshot`] is the wire shape of externally sourced world state
//! (JSON). [`RenderSnapshot`] is the flattened, render-ready view of a
//! [`WorldState`](crate::world::WorldState) consumed by the terminal view.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, SkinTone, Vec2};

/// One creature as described by the world-state source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Hex codepoint text, e.g. `"1f469-200d-1f4bb"`.
    pub emoji: String,
    /// Skin-tone modifier codepoint. Values outside the modifier range mean
    /// "no tone".
    #[serde(default)]
    pub tone: Option<u32>,
    pub x: f32,
    pub y: f32,
}

impl CreatureRecord {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn skin_tone(&self) -> Option<SkinTone> {
        self.tone.and_then(SkinTone::from_codepoint)
    }
}

/// Externally sourced world state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    #[serde(default)]
    pub map_size: Option<f32>,
    #[serde(default)]
    pub creatures: Vec<CreatureRecord>,
}

impl WorldSnapshot {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A sprite ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSnapshot {
    pub id: EntityId,
    pub name: String,
    /// Display text of the toned avatar.
    pub glyph: String,
    pub position: Vec2,
    pub moving: bool,
}

/// Render-ready world state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderSnapshot {
    pub map_size: f32,
    pub sprites: Vec<SpriteSnapshot>,
}

impl RenderSnapshot {
    pub fn clear(&mut self) {
        self.map_size = 0.0;
        self.sprites.clear();
    }

    /// True when no sprite is moving.
    pub fn is_static(&self) -> bool {
        self.sprites.iter().all(|s| !s.moving)
    }

    pub fn sprite(&self, id: EntityId) -> Option<&SpriteSnapshot> {
        self.sprites.iter().find(|s| s.id == id)
    }

    /// Cheap change detector for render throttling.
    ///
    /// Positions are quantized to whole world units.
    pub fn fingerprint(&self) -> u64 {
        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.map_size.to_bits().hash(&mut h);
        for s in &self.sprites {
            s.id.hash(&mut h);
            s.glyph.hash(&mut h);
            (s.position.x.round() as i32).hash(&mut h);
            (s.position.y.round() as i32).hash(&mut h);
        }
        h.finish()
    }
}

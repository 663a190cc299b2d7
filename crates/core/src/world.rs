//! World state store.
//!
//! An explicit, caller-owned store of every creature on the map. The app
//! mutates targets through it, the frame scheduler ticks motions through it,
//! and the view reads a [`RenderSnapshot`] out of it.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::emoji::{apply_skin_tone, parse_hex, to_display_string, CodepointSequence, ParseError};
use crate::motion::{Motion, MotionConfig, MotionState};
use crate::snapshot::{RenderSnapshot, SpriteSnapshot, WorldSnapshot};
use crate::types::{EntityId, SkinTone, Vec2, MAP_SIZE};

/// Id reserved for the locally controlled creature.
///
/// [`WorldState::spawn`] never hands it out and snapshots cannot touch it.
pub const PLAYER_ID: EntityId = EntityId(0);

/// Errors from world mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("unknown entity {id}")]
    UnknownEntity { id: EntityId },

    #[error("entity {id} has an invalid avatar: {source}")]
    InvalidAvatar {
        id: EntityId,
        #[source]
        source: ParseError,
    },
}

/// A creature on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub id: EntityId,
    pub name: String,
    pub avatar: CodepointSequence,
    pub tone: Option<SkinTone>,
    pub motion: Motion,
}

impl Creature {
    /// Avatar with the creature's skin tone applied.
    pub fn glyph(&self) -> CodepointSequence {
        apply_skin_tone(&self.avatar, self.tone)
    }
}

/// What [`WorldState::apply_snapshot`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotChanges {
    pub spawned: Vec<EntityId>,
    pub despawned: Vec<EntityId>,
    pub updated: usize,
}

/// Owns every creature and its motion.
#[derive(Debug, Clone)]
pub struct WorldState {
    map_size: f32,
    motion: MotionConfig,
    creatures: BTreeMap<EntityId, Creature>,
    next_id: u32,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(MAP_SIZE)
    }
}

impl WorldState {
    pub fn new(map_size: f32) -> Self {
        Self::with_motion(map_size, MotionConfig::default())
    }

    pub fn with_motion(map_size: f32, motion: MotionConfig) -> Self {
        Self {
            map_size,
            motion,
            creatures: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn map_size(&self) -> f32 {
        self.map_size
    }

    /// Resize the map, pulling every creature back inside it.
    pub fn set_map_size(&mut self, map_size: f32) {
        self.map_size = map_size;
        for c in self.creatures.values_mut() {
            let current = c.motion.current().clamp_to(map_size);
            let target = c.motion.target().clamp_to(map_size);
            if current != c.motion.current() {
                c.motion.teleport(current);
            }
            c.motion.set_target(target);
        }
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.creatures.contains_key(&id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.creatures.keys().copied()
    }

    /// Add a creature resting at `at` and return its new id.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        avatar: CodepointSequence,
        tone: Option<SkinTone>,
        at: Vec2,
    ) -> EntityId {
        while self.creatures.contains_key(&EntityId(self.next_id)) || self.next_id == PLAYER_ID.0 {
            self.next_id = self.next_id.wrapping_add(1);
        }
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.insert(id, name, avatar, tone, at);
        id
    }

    /// Add (or replace) the creature with a given id.
    pub fn insert(
        &mut self,
        id: EntityId,
        name: impl Into<String>,
        avatar: CodepointSequence,
        tone: Option<SkinTone>,
        at: Vec2,
    ) {
        let at = at.clamp_to(self.map_size);
        let creature = Creature {
            id,
            name: name.into(),
            avatar,
            tone,
            motion: Motion::with_config(at, self.motion),
        };
        debug!(%id, x = at.x, y = at.y, "creature spawned");
        self.creatures.insert(id, creature);
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Creature> {
        let removed = self.creatures.remove(&id);
        if removed.is_some() {
            debug!(%id, "creature despawned");
        }
        removed
    }

    fn creature_mut(&mut self, id: EntityId) -> Result<&mut Creature, WorldError> {
        self.creatures
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity { id })
    }

    /// Point a creature at `target`, clamped to the map.
    pub fn set_target(&mut self, id: EntityId, target: Vec2) -> Result<(), WorldError> {
        let target = target.clamp_to(self.map_size);
        self.creature_mut(id)?.motion.set_target(target);
        Ok(())
    }

    /// Shift a creature's target by `delta`, clamped to the map.
    pub fn nudge_target(&mut self, id: EntityId, delta: Vec2) -> Result<Vec2, WorldError> {
        let map_size = self.map_size;
        let motion = &mut self.creature_mut(id)?.motion;
        let target = (motion.target() + delta).clamp_to(map_size);
        motion.set_target(target);
        Ok(target)
    }

    pub fn set_avatar(&mut self, id: EntityId, avatar: CodepointSequence) -> Result<(), WorldError> {
        self.creature_mut(id)?.avatar = avatar;
        Ok(())
    }

    pub fn set_tone(&mut self, id: EntityId, tone: Option<SkinTone>) -> Result<(), WorldError> {
        self.creature_mut(id)?.tone = tone;
        Ok(())
    }

    /// Advance one creature's motion by a frame.
    pub fn tick_entity(&mut self, id: EntityId) -> Option<MotionState> {
        self.creatures.get_mut(&id).map(|c| c.motion.tick())
    }

    /// Advance every creature. Returns how many are still moving.
    pub fn tick_all(&mut self) -> usize {
        self.creatures
            .values_mut()
            .map(|c| c.motion.tick())
            .filter(|s| *s == MotionState::Moving)
            .count()
    }

    pub fn all_settled(&self) -> bool {
        self.creatures.values().all(|c| c.motion.is_settled())
    }

    /// Merge externally sourced world state.
    ///
    /// Known ids get new targets, names and avatars; new ids are spawned at
    /// their reported position; ids no longer reported are removed.
    /// [`PLAYER_ID`] is neither updated nor removed. Avatars are validated
    /// before anything is applied, so a bad record leaves the world untouched.
    pub fn apply_snapshot(&mut self, snapshot: &WorldSnapshot) -> Result<SnapshotChanges, WorldError> {
        let mut resolved = Vec::with_capacity(snapshot.creatures.len());
        for record in snapshot.creatures.iter().filter(|r| r.id != PLAYER_ID) {
            let avatar = parse_hex(&record.emoji).map_err(|source| WorldError::InvalidAvatar {
                id: record.id,
                source,
            })?;
            resolved.push((record, avatar));
        }

        if let Some(size) = snapshot.map_size {
            if size.is_finite() && size > 0.0 && size != self.map_size {
                info!(from = self.map_size, to = size, "map resized by snapshot");
                self.set_map_size(size);
            }
        }

        let mut changes = SnapshotChanges::default();
        for (record, avatar) in resolved {
            let tone = record.skin_tone();
            match self.creatures.get_mut(&record.id) {
                Some(c) => {
                    c.name.clone_from(&record.name);
                    c.avatar = avatar;
                    c.tone = tone;
                    c.motion.set_target(record.position().clamp_to(self.map_size));
                    changes.updated += 1;
                }
                None => {
                    self.insert(record.id, record.name.clone(), avatar, tone, record.position());
                    changes.spawned.push(record.id);
                }
            }
        }

        let stale: Vec<EntityId> = self
            .creatures
            .keys()
            .copied()
            .filter(|id| *id != PLAYER_ID && !snapshot.creatures.iter().any(|r| r.id == *id))
            .collect();
        for id in stale {
            self.creatures.remove(&id);
            changes.despawned.push(id);
        }

        info!(
            spawned = changes.spawned.len(),
            despawned = changes.despawned.len(),
            updated = changes.updated,
            "world snapshot applied"
        );
        Ok(changes)
    }

    /// Fill `out` with the render-ready state, reusing its allocation.
    pub fn render_snapshot_into(&self, out: &mut RenderSnapshot) {
        out.clear();
        out.map_size = self.map_size;
        out.sprites.extend(self.creatures.values().map(|c| SpriteSnapshot {
            id: c.id,
            name: c.name.clone(),
            glyph: to_display_string(&c.glyph()),
            position: c.motion.current(),
            moving: !c.motion.is_settled(),
        }));
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        let mut out = RenderSnapshot::default();
        self.render_snapshot_into(&mut out);
        out
    }
}

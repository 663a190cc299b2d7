//! Cooperative per-frame tick driver.
//!
//! The host calls [`FrameScheduler::tick`] once per rendered frame. Only
//! entities holding a live [`FrameSubscription`] are advanced; the guard is
//! owned by whatever draws the sprite, so tearing the sprite down releases
//! its per-frame callback. While the host is hidden no ticks run, and nothing
//! is replayed on resume.
//!
//! Everything here is single-threaded (`Rc`/`Weak`), like the frame loop.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::motion::MotionState;
use crate::types::EntityId;
use crate::world::WorldState;

type Registry = RefCell<BTreeMap<EntityId, usize>>;

/// Keeps an entity in the tick set until dropped.
#[derive(Debug)]
#[must_use = "dropping the subscription stops the entity's animation"]
pub struct FrameSubscription {
    id: EntityId,
    registry: Weak<Registry>,
}

impl FrameSubscription {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Whether the owning scheduler is still alive.
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }

    /// Stop ticking this entity now.
    pub fn cancel(self) {}
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut subs = registry.borrow_mut();
        if let Some(count) = subs.get_mut(&self.id) {
            *count -= 1;
            if *count == 0 {
                subs.remove(&self.id);
            }
        }
    }
}

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Frames executed so far, this one included.
    pub frame: u64,
    /// Entities advanced this frame.
    pub ticked: usize,
    /// Entities still moving after this frame.
    pub moving: usize,
}

/// Drives [`Motion`](crate::motion::Motion) updates for subscribed entities.
#[derive(Debug)]
pub struct FrameScheduler {
    registry: Rc<Registry>,
    visible: bool,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(BTreeMap::new())),
            visible: true,
            frames: 0,
        }
    }

    /// Start ticking `id` every frame until the returned guard is dropped.
    ///
    /// Several guards for one entity keep it subscribed until the last goes.
    pub fn subscribe(&self, id: EntityId) -> FrameSubscription {
        *self.registry.borrow_mut().entry(id).or_insert(0) += 1;
        FrameSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn is_subscribed(&self, id: EntityId) -> bool {
        self.registry.borrow().contains_key(&id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Hidden hosts do not tick.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame over every subscribed entity present in `world`.
    pub fn tick(&mut self, world: &mut WorldState) -> TickReport {
        if !self.visible {
            return TickReport {
                frame: self.frames,
                ..TickReport::default()
            };
        }

        self.frames += 1;
        let mut report = TickReport {
            frame: self.frames,
            ..TickReport::default()
        };
        for &id in self.registry.borrow().keys() {
            if let Some(state) = world.tick_entity(id) {
                report.ticked += 1;
                if state == MotionState::Moving {
                    report.moving += 1;
                }
            }
        }
        report
    }
}

//! App: the terminal host's state, independent of terminal I/O.
//!
//! Owns the world, the frame scheduler and one frame subscription per sprite
//! on screen. Keys become actions; actions become world mutations. The binary
//! only moves events in and frames out.

use std::collections::BTreeMap;

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::emoji::{
    apply_skin_tone, parse_hex, strip_skin_tones, to_asset_key, to_display_string,
};
use crate::core::{
    AssetSource, Catalog, CodepointSequence, FrameScheduler, FrameSubscription, RenderSnapshot,
    SnapshotChanges, TickReport, WorldError, WorldSnapshot, WorldState, PLAYER_ID,
};
use crate::input::{handle_key_event, EntryEvent, HexEntry, InputHandler};
use crate::term::{HudStatus, HudView};
use crate::types::{AppAction, AssetKeyStyle, EntityId, SkinTone, Vec2, MOVE_STEP};

/// What the player is wearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Index into the built-in catalog.
    Catalog(usize),
    /// Sequence typed at the hex prompt.
    Custom(CodepointSequence),
}

/// Owned side-panel contents; borrow with [`Hud::view`].
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub name: String,
    pub glyph: String,
    pub tone: Option<SkinTone>,
    pub tone_capable: bool,
    pub codepoints: String,
    pub asset_key: String,
    pub key_style: AssetKeyStyle,
    pub asset_url: String,
    pub position: Vec2,
    pub status: HudStatus,
    pub creatures: usize,
    pub message: Option<String>,
    pub prompt: Option<String>,
}

impl Hud {
    pub fn view(&self) -> HudView<'_> {
        HudView {
            name: &self.name,
            glyph: &self.glyph,
            tone: self.tone,
            tone_capable: self.tone_capable,
            codepoints: &self.codepoints,
            asset_key: &self.asset_key,
            key_style: self.key_style,
            asset_url: &self.asset_url,
            position: self.position,
            status: self.status,
            creatures: self.creatures,
            message: self.message.as_deref(),
            prompt: self.prompt.as_deref(),
        }
    }
}

pub struct App {
    world: WorldState,
    scheduler: FrameScheduler,
    sprites: BTreeMap<EntityId, FrameSubscription>,
    catalog: Catalog,
    avatar: Avatar,
    tone: Option<SkinTone>,
    asset_source: AssetSource,
    key_style: AssetKeyStyle,
    input: InputHandler,
    entry: HexEntry,
    message: Option<String>,
    paused: bool,
    focused: bool,
    quit: bool,
    /// Bumped on every change the world fingerprint does not capture.
    revision: u64,
    render: RenderSnapshot,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let catalog = Catalog;
        let index = config
            .player_emoji
            .as_deref()
            .and_then(|name| catalog.position(name))
            .unwrap_or(0);

        let mut world = WorldState::new(config.map_size);
        let centre = Vec2::new(config.map_size / 2.0, config.map_size / 2.0);
        world.insert(PLAYER_ID, "you", CodepointSequence::default(), None, centre);

        let scheduler = FrameScheduler::new();
        let mut sprites = BTreeMap::new();
        sprites.insert(PLAYER_ID, scheduler.subscribe(PLAYER_ID));

        let mut app = Self {
            world,
            scheduler,
            sprites,
            catalog,
            avatar: Avatar::Catalog(index),
            tone: None,
            asset_source: config.asset_source.clone(),
            key_style: config.asset_source.style,
            input: InputHandler::new(),
            entry: HexEntry::new(),
            message: None,
            paused: false,
            focused: true,
            quit: false,
            revision: 0,
            render: RenderSnapshot::default(),
        };
        app.sync_player();
        app
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn tone(&self) -> Option<SkinTone> {
        self.tone
    }

    pub fn key_style(&self) -> AssetKeyStyle {
        self.key_style
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_entering_hex(&self) -> bool {
        self.entry.is_open()
    }

    /// Whether `id` has a live frame subscription.
    pub fn is_animated(&self, id: EntityId) -> bool {
        self.sprites.contains_key(&id) && self.scheduler.is_subscribed(id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Base sequence of the current avatar, before any tone.
    pub fn base_sequence(&self) -> CodepointSequence {
        match &self.avatar {
            Avatar::Catalog(i) => self
                .catalog
                .get(*i)
                .and_then(|e| e.sequence().ok())
                .unwrap_or_default(),
            Avatar::Custom(seq) => seq.clone(),
        }
    }

    fn avatar_name(&self) -> &str {
        match &self.avatar {
            Avatar::Catalog(i) => self.catalog.get(*i).map_or("?", |e| e.name),
            Avatar::Custom(_) => "custom",
        }
    }

    /// Catalog entries declare tone support; typed sequences always take one.
    fn tone_capable(&self) -> bool {
        match &self.avatar {
            Avatar::Catalog(i) => self.catalog.get(*i).is_some_and(|e| e.tone_capable),
            Avatar::Custom(_) => true,
        }
    }

    /// The player's sequence with the chosen tone applied.
    pub fn player_sequence(&self) -> CodepointSequence {
        let tone = if self.tone_capable() { self.tone } else { None };
        apply_skin_tone(&self.base_sequence(), tone)
    }

    fn sync_player(&mut self) {
        let avatar = self.player_sequence();
        // The player is inserted in `new` and never despawned.
        if self.world.set_avatar(PLAYER_ID, avatar).is_ok() {
            self.revision = self.revision.wrapping_add(1);
        }
    }

    fn update_visibility(&mut self) {
        self.scheduler.set_visible(self.focused && !self.paused);
    }

    /// Route a terminal key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.entry.is_open() {
            if key.kind != KeyEventKind::Release {
                self.handle_entry_key(key);
            }
            return;
        }

        match key.kind {
            KeyEventKind::Press => {
                if let Some(action) = self.input.handle_key_press(key.code) {
                    self.apply(action);
                    return;
                }
                match handle_key_event(key) {
                    // Held movement is owned by the repeat handler.
                    Some(AppAction::Move(_)) | None => {}
                    Some(action) => self.apply(action),
                }
            }
            KeyEventKind::Repeat => {
                // Terminal auto-repeat; the repeat handler makes its own.
            }
            KeyEventKind::Release => self.input.handle_key_release(key.code),
        }
    }

    fn handle_entry_key(&mut self, key: KeyEvent) {
        match self.entry.handle_key(key) {
            EntryEvent::Editing => {}
            EntryEvent::Submitted(text) => self.submit_hex(&text),
            EntryEvent::Cancelled => debug!("hex entry cancelled"),
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::Move(dir) => {
                // The player always exists; a failure here means it was removed.
                if let Err(err) = self.world.nudge_target(PLAYER_ID, dir.delta() * MOVE_STEP) {
                    debug!(error = %err, "move ignored");
                }
            }
            AppAction::NextEmoji | AppAction::PrevEmoji => {
                let current = match self.avatar {
                    Avatar::Catalog(i) => i,
                    Avatar::Custom(_) => 0,
                };
                let next = if action == AppAction::NextEmoji {
                    self.catalog.next_index(current)
                } else {
                    self.catalog.prev_index(current)
                };
                self.avatar = Avatar::Catalog(next);
                self.message = None;
                self.sync_player();
            }
            AppAction::CycleTone => {
                self.tone = SkinTone::cycle(self.tone);
                self.sync_player();
            }
            AppAction::ClearTone => {
                self.tone = None;
                self.sync_player();
            }
            AppAction::BeginHexEntry => {
                self.input.reset();
                self.entry.open();
            }
            AppAction::ToggleKeyStyle => {
                self.key_style = match self.key_style {
                    AssetKeyStyle::Hyphenated => AssetKeyStyle::Underscored,
                    AssetKeyStyle::Underscored => AssetKeyStyle::Hyphenated,
                };
            }
            AppAction::TogglePause => {
                self.paused = !self.paused;
                self.update_visibility();
                info!(paused = self.paused, "pause toggled");
            }
            AppAction::Quit => self.quit = true,
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Select the sequence typed at the hex prompt.
    ///
    /// Bad input keeps the current avatar and explains why in the panel.
    pub fn submit_hex(&mut self, text: &str) {
        match parse_hex(text) {
            Ok(seq) => {
                // A typed tone becomes the selected tone.
                if let Some(tone) = seq.skin_tone() {
                    self.tone = Some(tone);
                }
                let base = strip_skin_tones(&seq);
                if base.is_empty() {
                    // Tone only: recolour the current avatar.
                    info!(tone = ?self.tone, "tone selected from hex entry");
                } else {
                    info!(sequence = %seq, "custom avatar selected");
                    self.avatar = Avatar::Custom(base);
                }
                self.message = None;
                self.sync_player();
            }
            Err(err) => {
                debug!(error = %err, input = text, "hex entry rejected");
                self.message = Some(format!("selection unchanged: {err}"));
            }
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Terminal focus changes; a hidden host runs no frames.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.input.reset();
        }
        self.update_visibility();
    }

    /// Advance input repeat and run one scheduler frame.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickReport {
        for action in self.input.update(elapsed_ms) {
            self.apply(action);
        }
        self.scheduler.tick(&mut self.world)
    }

    /// Merge external world state, attaching or dropping sprite subscriptions.
    pub fn apply_world_snapshot(
        &mut self,
        snapshot: &WorldSnapshot,
    ) -> Result<SnapshotChanges, WorldError> {
        let changes = self.world.apply_snapshot(snapshot)?;
        for &id in &changes.spawned {
            self.sprites.insert(id, self.scheduler.subscribe(id));
        }
        for id in &changes.despawned {
            self.sprites.remove(id);
        }
        self.revision = self.revision.wrapping_add(1);
        Ok(changes)
    }

    /// Rebuild the render snapshot from the world.
    pub fn refresh_render(&mut self) {
        self.world.render_snapshot_into(&mut self.render);
    }

    pub fn render(&self) -> &RenderSnapshot {
        &self.render
    }

    /// Nothing will change on screen without new input.
    pub fn is_idle(&self) -> bool {
        self.render.is_static() || !self.scheduler.is_visible()
    }

    /// Change detector covering both the world and the panel.
    pub fn fingerprint(&self) -> u64 {
        self.render.fingerprint() ^ self.revision.rotate_left(32)
    }

    pub fn hud(&self) -> Hud {
        let base = self.base_sequence();
        let sequence = self.player_sequence();
        let player = self.world.get(PLAYER_ID);
        let position = player.map_or(Vec2::ZERO, |c| c.motion.current());
        let status = if self.paused || !self.focused {
            HudStatus::Paused
        } else if player.map_or(true, |c| c.motion.is_settled()) {
            HudStatus::Settled
        } else {
            HudStatus::Moving
        };

        Hud {
            name: self.avatar_name().to_string(),
            glyph: to_display_string(&sequence),
            tone: self.tone,
            tone_capable: self.tone_capable() && !base.is_empty(),
            codepoints: sequence.to_string(),
            asset_key: to_asset_key(&sequence, self.key_style),
            key_style: self.key_style,
            asset_url: self.asset_source.url(&sequence),
            position,
            status,
            creatures: self.world.len(),
            message: self.message.clone(),
            prompt: self.entry.is_open().then(|| self.entry.text().to_string()),
        }
    }
}

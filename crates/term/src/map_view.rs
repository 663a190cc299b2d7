//! MapView: maps a `RenderSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Camera, RenderSnapshot, ViewBox, PLAYER_ID};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{AssetKeyStyle, SkinTone, Vec2};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Columns reserved for the side panel.
pub const PANEL_WIDTH: u16 = 36;

/// Smallest map frame worth drawing a panel next to.
const MIN_MAP_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudStatus {
    Moving,
    Settled,
    Paused,
}

impl HudStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HudStatus::Moving => "moving",
            HudStatus::Settled => "settled",
            HudStatus::Paused => "paused",
        }
    }
}

/// Everything the side panel shows about the current selection.
#[derive(Debug, Clone, Copy)]
pub struct HudView<'a> {
    pub name: &'a str,
    pub glyph: &'a str,
    pub tone: Option<SkinTone>,
    pub tone_capable: bool,
    pub codepoints: &'a str,
    pub asset_key: &'a str,
    pub key_style: AssetKeyStyle,
    pub asset_url: &'a str,
    pub position: Vec2,
    pub status: HudStatus,
    pub creatures: usize,
    pub message: Option<&'a str>,
    /// Text typed so far when the hex prompt is open.
    pub prompt: Option<&'a str>,
}

/// Terminal renderer for the creature map.
pub struct MapView {
    /// World units covered by one map cell.
    cell_units: f32,
    /// Map cell width in terminal columns.
    cell_w: u16,
    /// Map cell height in terminal rows.
    cell_h: u16,
}

impl Default for MapView {
    fn default() -> Self {
        // 2x1 keeps cells roughly square and fits one wide emoji.
        Self {
            cell_units: 20.0,
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Where the map frame and its inner grid sit on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub cols: u16,
    pub rows: u16,
    pub view: ViewBox,
}

impl MapLayout {
    /// Screen position of the left column of grid cell (`col`, `row`).
    pub fn cell_origin(&self, col: u16, row: u16, cell_w: u16, cell_h: u16) -> (u16, u16) {
        (
            self.frame_x + 1 + col * cell_w,
            self.frame_y + 1 + row * cell_h,
        )
    }
}

impl MapView {
    pub fn new(cell_units: f32) -> Self {
        Self {
            cell_units: cell_units.max(1.0),
            ..Self::default()
        }
    }

    pub fn cell_units(&self) -> f32 {
        self.cell_units
    }

    /// Compute the frame and view box for `viewport`, centred on the player.
    pub fn layout(&self, snap: &RenderSnapshot, viewport: Viewport) -> MapLayout {
        let panel = if viewport.width >= MIN_MAP_WIDTH + PANEL_WIDTH {
            PANEL_WIDTH
        } else {
            0
        };
        let frame_w = viewport.width.saturating_sub(panel);
        let frame_h = viewport.height;
        let cols = frame_w.saturating_sub(2) / self.cell_w;
        let rows = frame_h.saturating_sub(2) / self.cell_h;

        let focus = snap
            .sprite(PLAYER_ID)
            .map(|s| s.position)
            .unwrap_or_else(|| Vec2::new(snap.map_size / 2.0, snap.map_size / 2.0));
        let view = Camera::new(snap.map_size).view_box(
            focus,
            cols as f32 * self.cell_units,
            rows as f32 * self.cell_units,
        );

        MapLayout {
            frame_x: 0,
            frame_y: 0,
            frame_w: cols * self.cell_w + 2,
            frame_h: rows * self.cell_h + 2,
            cols,
            rows,
            view,
        }
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        snap: &RenderSnapshot,
        hud: Option<&HudView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let layout = self.layout(snap, viewport);
        if layout.cols == 0 || layout.rows == 0 {
            return;
        }

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        self.draw_ground(fb, snap.map_size, &layout);

        for sprite in snap.sprites.iter().filter(|s| s.id != PLAYER_ID) {
            self.draw_sprite(fb, &layout, sprite.position, &sprite.glyph, false);
        }
        if let Some(player) = snap.sprite(PLAYER_ID) {
            self.draw_sprite(fb, &layout, player.position, &player.glyph, true);
        }

        if let Some(hud) = hud {
            draw_panel(fb, hud, viewport, layout.frame_x + layout.frame_w + 2);
            if hud.status == HudStatus::Paused {
                draw_overlay_text(fb, &layout, "PAUSED");
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RenderSnapshot,
        hud: Option<&HudView<'_>>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_ground(&self, fb: &mut FrameBuffer, map_size: f32, layout: &MapLayout) {
        let inside = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: true,
        };
        let outside = CellStyle {
            fg: Rgb::new(40, 40, 40),
            bg: Rgb::new(10, 10, 12),
            ..CellStyle::default()
        };

        for row in 0..layout.rows {
            for col in 0..layout.cols {
                let p = layout.view.unproject(col, row, layout.cols, layout.rows);
                let on_map = (0.0..=map_size).contains(&p.x) && (0.0..=map_size).contains(&p.y);
                let (x, y) = layout.cell_origin(col, row, self.cell_w, self.cell_h);
                if on_map {
                    fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', inside);
                    fb.put_char(x, y, '·', inside);
                } else {
                    fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', outside);
                }
            }
        }
    }

    fn draw_sprite(
        &self,
        fb: &mut FrameBuffer,
        layout: &MapLayout,
        position: Vec2,
        glyph: &str,
        player: bool,
    ) {
        let Some((col, row)) = layout.view.project(position, layout.cols, layout.rows) else {
            return;
        };
        let (x, y) = layout.cell_origin(col, row, self.cell_w, self.cell_h);
        let style = CellStyle {
            fg: Rgb::new(240, 240, 240),
            bg: if player {
                Rgb::new(60, 60, 90)
            } else {
                Rgb::new(30, 30, 40)
            },
            bold: player,
            dim: false,
        };
        fb.put_wide(x, y, glyph, style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &MapLayout, text: &str) {
    let style = CellStyle {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    };
    let len = text.chars().count() as u16;
    let x = layout.frame_x + layout.frame_w.saturating_sub(len) / 2;
    let y = layout.frame_y + layout.frame_h / 2;
    fb.put_str(x, y, text, style);
}

fn draw_panel(fb: &mut FrameBuffer, hud: &HudView<'_>, viewport: Viewport, panel_x: u16) {
    if panel_x >= viewport.width {
        return;
    }
    let panel_w = viewport.width - panel_x;
    if panel_w < 12 {
        return;
    }

    let label = CellStyle {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    };
    let value = CellStyle {
        fg: Rgb::new(200, 200, 200),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: false,
    };
    let error = CellStyle {
        fg: Rgb::new(240, 110, 110),
        ..value
    };
    let hint = CellStyle { dim: true, ..value };

    let mut y = 1u16;
    let line = |fb: &mut FrameBuffer, text: &str, style: CellStyle, y: &mut u16| {
        if *y < viewport.height {
            fb.put_str(panel_x, *y, text, style);
        }
        *y = y.saturating_add(1);
    };

    line(fb, "AVATAR", label, &mut y);
    if y < viewport.height {
        fb.put_wide(panel_x, y, hud.glyph, value);
        fb.put_str(panel_x + 3, y, hud.name, value);
    }
    y = y.saturating_add(2);

    line(fb, "TONE", label, &mut y);
    let tone = match (hud.tone, hud.tone_capable) {
        (Some(t), _) => t.as_str(),
        (None, true) => "default",
        (None, false) => "n/a",
    };
    line(fb, tone, value, &mut y);
    y = y.saturating_add(1);

    line(fb, "CODEPOINTS", label, &mut y);
    for chunk in wrap(hud.codepoints, panel_w as usize) {
        line(fb, chunk, value, &mut y);
    }
    y = y.saturating_add(1);

    let key_label = match hud.key_style {
        AssetKeyStyle::Hyphenated => "ASSET KEY (-)",
        AssetKeyStyle::Underscored => "ASSET KEY (_)",
    };
    line(fb, key_label, label, &mut y);
    line(fb, hud.asset_key, value, &mut y);
    for chunk in wrap(hud.asset_url, panel_w as usize) {
        line(fb, chunk, hint, &mut y);
    }
    y = y.saturating_add(1);

    line(fb, "POSITION", label, &mut y);
    let pos = format!(
        "{:.0}, {:.0}  {}",
        hud.position.x,
        hud.position.y,
        hud.status.as_str()
    );
    line(fb, &pos, value, &mut y);
    line(fb, &format!("{} creatures", hud.creatures), hint, &mut y);
    y = y.saturating_add(1);

    if let Some(msg) = hud.message {
        for chunk in wrap(msg, panel_w as usize) {
            line(fb, chunk, error, &mut y);
        }
        y = y.saturating_add(1);
    }

    if let Some(text) = hud.prompt {
        line(fb, &format!("HEX> {text}_"), label, &mut y);
    } else {
        let help = "arrows/wasd move  n/b emoji  t tone  0 clear  x hex  u key  p pause  q quit";
        for chunk in wrap(help, panel_w as usize) {
            line(fb, chunk, hint, &mut y);
        }
    }
}

/// Split `s` into pieces of at most `width` chars.
fn wrap(s: &str, width: usize) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() && width > 0 {
        let cut = rest
            .char_indices()
            .nth(width)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        out.push(head);
        rest = tail;
    }
    out
}

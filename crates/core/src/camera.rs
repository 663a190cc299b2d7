//! Camera: which part of the map is visible.
//!
//! The view box follows a focus point (usually the player) and is clamped so
//! it never shows space outside the map. A view larger than the map is
//! centred on it instead.

use crate::types::Vec2;

/// Visible rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Map a world point onto a `cols` x `rows` grid covering this box.
    ///
    /// Points on the far edges land in the last column/row. Points outside
    /// the box return `None`.
    pub fn project(&self, p: Vec2, cols: u16, rows: u16) -> Option<(u16, u16)> {
        if cols == 0 || rows == 0 || self.width <= 0.0 || self.height <= 0.0 || !self.contains(p) {
            return None;
        }
        let col = ((p.x - self.x) / self.width * cols as f32) as u16;
        let row = ((p.y - self.y) / self.height * rows as f32) as u16;
        Some((col.min(cols - 1), row.min(rows - 1)))
    }

    /// World point at the centre of grid cell (`col`, `row`).
    pub fn unproject(&self, col: u16, row: u16, cols: u16, rows: u16) -> Vec2 {
        let cw = self.width / cols.max(1) as f32;
        let ch = self.height / rows.max(1) as f32;
        Vec2::new(
            self.x + (col as f32 + 0.5) * cw,
            self.y + (row as f32 + 0.5) * ch,
        )
    }
}

/// Computes view boxes over a square map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub map_size: f32,
}

impl Camera {
    pub fn new(map_size: f32) -> Self {
        Self { map_size }
    }

    /// View box of `width` x `height` world units around `focus`.
    pub fn view_box(&self, focus: Vec2, width: f32, height: f32) -> ViewBox {
        ViewBox {
            x: axis_origin(focus.x, width, self.map_size),
            y: axis_origin(focus.y, height, self.map_size),
            width,
            height,
        }
    }
}

fn axis_origin(focus: f32, extent: f32, map: f32) -> f32 {
    if extent >= map {
        (map - extent) / 2.0
    } else {
        (focus - extent / 2.0).clamp(0.0, map - extent)
    }
}

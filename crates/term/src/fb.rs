//! Framebuffer and style types for terminal rendering.
//!
//! Cells hold a short grapheme (an emoji sequence can span several
//! codepoints). Emoji occupy two terminal columns: the glyph lives in the
//! left cell and the right cell is a continuation that is never printed.

use arrayvec::ArrayString;

/// Byte capacity of one cell's glyph text.
pub const GLYPH_CAPACITY: usize = 32;

pub type Glyph = ArrayString<GLYPH_CAPACITY>;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

/// A single terminal cell.
///
/// An empty glyph marks the right half of a wide glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: Glyph,
    pub style: CellStyle,
}

impl Cell {
    pub fn from_char(ch: char, style: CellStyle) -> Self {
        let mut glyph = Glyph::new();
        glyph.push(ch);
        Self { glyph, style }
    }

    pub fn continuation(style: CellStyle) -> Self {
        Self {
            glyph: Glyph::new(),
            style,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.glyph.is_empty()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ', CellStyle::default())
    }
}

/// 2D framebuffer of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// until the next `clear`.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize((width as usize) * (height as usize), Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Blank the other half of any wide glyph covering (`x`, `y`).
    fn break_wide(&mut self, x: u16, y: u16) {
        let Some(cell) = self.get(x, y) else {
            return;
        };
        if cell.is_continuation() {
            if let Some(left) = x.checked_sub(1).and_then(|lx| self.get(lx, y)) {
                self.set(x - 1, y, Cell::from_char(' ', left.style));
            }
        } else if let Some(right) = self.get(x + 1, y).filter(Cell::is_continuation) {
            self.set(x + 1, y, Cell::from_char(' ', right.style));
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.break_wide(x, y);
        self.set(x, y, Cell::from_char(ch, style));
    }

    /// Write narrow text left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Write a two-column glyph at (`x`, `y`).
    ///
    /// Falls back to `?` when the glyph is too long to store or when its right
    /// half would fall off the buffer.
    pub fn put_wide(&mut self, x: u16, y: u16, glyph: &str, style: CellStyle) {
        if x >= self.width || y >= self.height {
            return;
        }
        let stored = Glyph::from(glyph).ok().filter(|g| !g.is_empty());
        match stored {
            Some(glyph) if x + 1 < self.width => {
                self.break_wide(x, y);
                self.break_wide(x + 1, y);
                self.set(x, y, Cell { glyph, style });
                self.set(x + 1, y, Cell::continuation(style));
            }
            _ => self.put_char(x, y, '?', style),
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Visible text of row `y` (continuations skipped). Handy in tests.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                out.push_str(&cell.glyph);
            }
        }
        out
    }
}

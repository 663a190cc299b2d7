//! Terminal rendering for the creature map.
//!
//! Rendering goes through a small framebuffer of styled glyph cells rather
//! than a widget toolkit, so the map view stays pure and testable and the
//! terminal backend only has to flush changed runs.
//!
//! - [`MapView`] turns a render snapshot (plus an optional HUD) into cells
//! - [`TerminalRenderer`] diffs and writes cells to the terminal
//! - [`RenderThrottle`] skips redundant frames while nothing moves

pub mod fb;
pub mod map_view;
pub mod render_throttle;
pub mod renderer;

pub use critters_core as core;
pub use critters_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Glyph, Rgb};
pub use map_view::{HudStatus, HudView, MapLayout, MapView, Viewport, PANEL_WIDTH};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

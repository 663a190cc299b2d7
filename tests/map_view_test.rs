use critters::core::emoji::parse_hex;
use critters::core::{WorldState, PLAYER_ID};
use critters::term::{FrameBuffer, HudStatus, HudView, MapView, Viewport, PANEL_WIDTH};
use critters::types::{AssetKeyStyle, Vec2};

fn world_with_player(at: Vec2) -> WorldState {
    let mut world = WorldState::default();
    world.insert(PLAYER_ID, "me", parse_hex("1f408").unwrap(), None, at);
    world
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn hud<'a>(status: HudStatus, message: Option<&'a str>, prompt: Option<&'a str>) -> HudView<'a> {
    HudView {
        name: "cat",
        glyph: "\u{1F408}",
        tone: None,
        tone_capable: false,
        codepoints: "U+1F408",
        asset_key: "1f408",
        key_style: AssetKeyStyle::Hyphenated,
        asset_url: "https://example.invalid/1f408.svg",
        position: Vec2::new(400.0, 400.0),
        status,
        creatures: 1,
        message,
        prompt,
    }
}

#[test]
fn map_view_renders_border_corners() {
    let snap = world_with_player(Vec2::new(400.0, 400.0)).render_snapshot();
    let view = MapView::default();
    // No panel below the minimum width: 20 columns => 9 cells wide + border.
    let fb = view.render(&snap, None, Viewport::new(20, 10));

    assert_eq!(fb.get(0, 0).unwrap().glyph.as_str(), "┌");
    assert_eq!(fb.get(19, 0).unwrap().glyph.as_str(), "┐");
    assert_eq!(fb.get(0, 9).unwrap().glyph.as_str(), "└");
    assert_eq!(fb.get(19, 9).unwrap().glyph.as_str(), "┘");
}

#[test]
fn player_is_drawn_two_columns_wide() {
    let snap = world_with_player(Vec2::new(400.0, 400.0)).render_snapshot();
    let view = MapView::new(20.0);
    let fb = view.render(&snap, None, Viewport::new(22, 12));

    let text = screen_text(&fb);
    assert_eq!(text.matches('\u{1F408}').count(), 1);

    let (x, y) = (0..fb.height())
        .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
        .find(|&(x, y)| fb.get(x, y).unwrap().glyph.as_str() == "\u{1F408}")
        .unwrap();
    assert!(fb.get(x + 1, y).unwrap().is_continuation());
}

#[test]
fn sprites_outside_the_view_are_not_drawn() {
    let mut world = world_with_player(Vec2::new(400.0, 400.0));
    world.spawn("far", parse_hex("1f47b").unwrap(), None, Vec2::new(0.0, 0.0));
    world.spawn("near", parse_hex("1f415").unwrap(), None, Vec2::new(420.0, 400.0));
    let snap = world.render_snapshot();

    // 10x8 cells of 20 units: a 200x160 window around the player.
    let fb = MapView::new(20.0).render(&snap, None, Viewport::new(22, 10));
    let text = screen_text(&fb);
    assert!(text.contains('\u{1F415}'));
    assert!(!text.contains('\u{1F47B}'));
}

#[test]
fn camera_clamps_at_map_corner() {
    // Player in the corner: the view must not show space outside the map,
    // so the player sits in the first grid cell with map dots around it.
    let snap = world_with_player(Vec2::new(0.0, 0.0)).render_snapshot();
    let fb = MapView::new(20.0).render(&snap, None, Viewport::new(22, 10));
    assert_eq!(fb.get(1, 1).unwrap().glyph.as_str(), "\u{1F408}");
    assert_eq!(fb.get(1, 2).unwrap().glyph.as_str(), "·");
    assert_eq!(fb.get(3, 1).unwrap().glyph.as_str(), "·");
}

#[test]
fn panel_shows_hud_and_error() {
    let snap = world_with_player(Vec2::new(400.0, 400.0)).render_snapshot();
    let view = MapView::default();
    let h = hud(
        HudStatus::Settled,
        Some("selection unchanged: invalid codepoint token `zz`"),
        None,
    );
    let fb = view.render(&snap, Some(&h), Viewport::new(40 + PANEL_WIDTH, 40));
    let text = screen_text(&fb);

    assert!(text.contains("AVATAR"));
    assert!(text.contains("U+1F408"));
    assert!(text.contains("ASSET KEY (-)"));
    assert!(text.contains("settled"));
    assert!(text.contains("selection unchanged"));
}

#[test]
fn panel_shows_prompt_and_pause_overlay() {
    let snap = world_with_player(Vec2::new(400.0, 400.0)).render_snapshot();
    let view = MapView::default();
    let h = hud(HudStatus::Paused, None, Some("1f4"));
    let fb = view.render(&snap, Some(&h), Viewport::new(40 + PANEL_WIDTH, 30));
    let text = screen_text(&fb);

    assert!(text.contains("HEX> 1f4_"));
    assert!(text.contains("PAUSED"));
}

#[test]
fn render_into_reuses_and_resizes_buffer() {
    let snap = world_with_player(Vec2::new(400.0, 400.0)).render_snapshot();
    let view = MapView::default();
    let mut fb = FrameBuffer::new(5, 5);
    view.render_into(&snap, None, Viewport::new(30, 12), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 12));
}

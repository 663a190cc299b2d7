//! End-to-end app flow through the facade: keys in, frames out.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use critters::app::{App, Avatar};
use critters::config::AppConfig;
use critters::core::{CreatureRecord, WorldSnapshot, PLAYER_ID};
use critters::term::{HudStatus, MapView, Viewport};
use critters::types::{EntityId, SkinTone, Vec2};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::from(code));
}

fn release(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    });
}

fn run_frames(app: &mut App, n: usize) {
    for _ in 0..n {
        app.tick(16);
    }
}

#[test]
fn arrow_key_walks_one_step() {
    let mut app = App::new(&AppConfig::default());
    press(&mut app, KeyCode::Right);
    release(&mut app, KeyCode::Right);
    run_frames(&mut app, 10);

    let player = app.world().get(PLAYER_ID).unwrap();
    assert_eq!(player.motion.current(), Vec2::new(440.0, 400.0));
    assert_eq!(app.hud().status, HudStatus::Settled);
}

#[test]
fn player_cannot_leave_the_map() {
    let mut app = App::new(&AppConfig::default());
    for _ in 0..30 {
        press(&mut app, KeyCode::Up);
        release(&mut app, KeyCode::Up);
    }
    run_frames(&mut app, 200);
    assert_eq!(
        app.world().get(PLAYER_ID).unwrap().motion.current(),
        Vec2::new(400.0, 0.0)
    );
}

#[test]
fn picking_avatar_and_tone_updates_the_hud() {
    let mut app = App::new(&AppConfig::default());
    // Step back from cat to the last entry and forward again.
    press(&mut app, KeyCode::Char('b'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.avatar(), &Avatar::Catalog(0));

    for _ in 0..12 {
        press(&mut app, KeyCode::Char('n'));
    }
    assert_eq!(app.hud().name, "waving hand");

    press(&mut app, KeyCode::Char('t'));
    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.tone(), Some(SkinTone::MediumLight));
    let hud = app.hud();
    assert_eq!(hud.asset_key, "1f44b-1f3fc");
    assert_eq!(hud.glyph, "\u{1F44B}\u{1F3FC}");

    press(&mut app, KeyCode::Char('u'));
    assert_eq!(app.hud().asset_key, "1f44b_1f3fc");

    press(&mut app, KeyCode::Char('0'));
    assert_eq!(app.hud().asset_key, "1f44b");
}

#[test]
fn typed_hex_selects_custom_avatar() {
    let mut app = App::new(&AppConfig::default());
    press(&mut app, KeyCode::Char('x'));
    for ch in "1f469 200d 1f680".chars() {
        press(&mut app, KeyCode::Char(ch));
    }
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('t'));

    assert_eq!(app.hud().asset_key, "1f469-1f3fb-200d-1f680");
    assert_eq!(
        app.world().get(PLAYER_ID).unwrap().avatar,
        app.player_sequence()
    );
}

#[test]
fn typed_garbage_keeps_selection() {
    let mut app = App::new(&AppConfig::default());
    press(&mut app, KeyCode::Char('x'));
    for ch in "1f469 zz".chars() {
        press(&mut app, KeyCode::Char(ch));
    }
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.avatar(), &Avatar::Catalog(0));
    let hud = app.hud();
    assert_eq!(hud.asset_key, "1f408");
    assert_eq!(
        hud.message.as_deref(),
        Some("selection unchanged: invalid codepoint token `zz`")
    );
}

#[test]
fn world_snapshot_creatures_walk_and_render() {
    let mut app = App::new(&AppConfig::default());
    let record = |x: f32| CreatureRecord {
        id: EntityId(7),
        name: "dog".into(),
        emoji: "1f415".into(),
        tone: None,
        x,
        y: 400.0,
    };
    app.apply_world_snapshot(&WorldSnapshot {
        map_size: None,
        creatures: vec![record(380.0)],
    })
    .unwrap();
    app.apply_world_snapshot(&WorldSnapshot {
        map_size: None,
        creatures: vec![record(360.0)],
    })
    .unwrap();

    app.refresh_render();
    assert!(!app.is_idle());
    run_frames(&mut app, 4);
    app.refresh_render();
    assert!(app.is_idle());
    assert_eq!(
        app.render().sprite(EntityId(7)).unwrap().position,
        Vec2::new(360.0, 400.0)
    );

    let hud = app.hud();
    let fb = MapView::default().render(app.render(), Some(&hud.view()), Viewport::new(80, 30));
    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains('\u{1F415}'));
    assert!(text.contains('\u{1F408}'));
    assert!(text.contains("2 creatures"));
}

#[test]
fn fingerprint_tracks_panel_changes() {
    let mut app = App::new(&AppConfig::default());
    app.refresh_render();
    let before = app.fingerprint();
    press(&mut app, KeyCode::Char('u'));
    app.refresh_render();
    assert_ne!(app.fingerprint(), before);
}

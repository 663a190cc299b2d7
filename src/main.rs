//! Critters terminal runner (default binary).
//!
//! Renders the creature map with a custom framebuffer renderer, drives the
//! frame scheduler at a fixed tick and polls the optional world file.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{error, info, warn};

use critters::app::App;
use critters::config::AppConfig;
use critters::logging;
use critters::term::{FrameBuffer, MapView, RenderThrottle, TerminalRenderer, Viewport};
use critters::types::STATIC_RENDER_INTERVAL_MS;
use critters::world_file::WorldFile;

const WORLD_POLL_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    let _log_guard = logging::init(&config.log_dir)?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = format!("{err:#}"), "exited with error");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut app = App::new(config);
    let mut world_file = config.world_path.clone().map(WorldFile::new);

    let view = MapView::new(config.cell_units);
    let mut throttle = RenderThrottle::new(STATIC_RENDER_INTERVAL_MS);
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms);
    let mut last_tick = Instant::now();
    let mut last_poll: Option<Instant> = None;
    let mut last_world_error: Option<String> = None;

    loop {
        // World file.
        if let Some(file) = world_file.as_mut() {
            if last_poll.map_or(true, |t| t.elapsed() >= WORLD_POLL_INTERVAL) {
                last_poll = Some(Instant::now());
                poll_world(&mut app, file, &mut last_world_error);
            }
        }

        // Render.
        app.refresh_render();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.fingerprint(), app.is_idle()) {
            let hud = app.hud();
            view.render_into(app.render(), Some(&hud.view()), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::FocusGained => app.set_focus(true),
                Event::FocusLost => app.set_focus(false),
                Event::Resize(..) => {
                    throttle.invalidate();
                    term.invalidate();
                }
                _ => {}
            }
            if app.should_quit() {
                info!("quit");
                return Ok(());
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            // No catch-up: one frame per tick however late it is.
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

/// Apply the world file if it changed. Repeated identical read errors are
/// logged once.
fn poll_world(app: &mut App, file: &mut WorldFile, last_error: &mut Option<String>) {
    let polled = file.poll();
    if polled.is_ok() {
        *last_error = None;
    }
    match polled {
        Ok(Some(snapshot)) => match app.apply_world_snapshot(&snapshot) {
            Ok(changes) => info!(
                path = %file.path().display(),
                spawned = changes.spawned.len(),
                despawned = changes.despawned.len(),
                "world file applied"
            ),
            Err(err) => warn!(path = %file.path().display(), error = %err, "world file rejected"),
        },
        Ok(None) => {}
        Err(err) => {
            let msg = format!("{err:#}");
            if last_error.as_deref() != Some(msg.as_str()) {
                warn!(error = %msg, "world file unreadable");
                *last_error = Some(msg);
            }
        }
    }
}

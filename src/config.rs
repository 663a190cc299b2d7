//! Application configuration from `CRITTERS_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::AssetSource;
use crate::types::{MAP_SIZE, TICK_MS};

/// Runtime settings for the terminal app.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Side length of the square map in world units.
    pub map_size: f32,
    /// Frame interval in milliseconds.
    pub tick_ms: u64,
    /// Optional JSON world snapshot, polled for changes.
    pub world_path: Option<PathBuf>,
    pub asset_source: AssetSource,
    /// Directory for the log file.
    pub log_dir: PathBuf,
    /// World units covered by one map cell on screen.
    pub cell_units: f32,
    /// Catalog name of the avatar the player starts with.
    pub player_emoji: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_size: MAP_SIZE,
            tick_ms: TICK_MS as u64,
            world_path: None,
            asset_source: AssetSource::default(),
            log_dir: PathBuf::from("logs"),
            cell_units: 20.0,
            player_emoji: None,
        }
    }
}

impl AppConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CRITTERS_MAP_SIZE` - map side length (default: 800)
    /// - `CRITTERS_TICK_MS` - frame interval (default: 16)
    /// - `CRITTERS_WORLD_PATH` - JSON world snapshot file (default: none)
    /// - `CRITTERS_ASSET_SET` - `twemoji` or `noto` (default: twemoji)
    /// - `CRITTERS_ASSET_TEMPLATE` - custom URL template containing `{key}`
    /// - `CRITTERS_LOG_DIR` - log directory (default: `logs`)
    /// - `CRITTERS_CELL_UNITS` - world units per map cell (default: 20)
    /// - `CRITTERS_PLAYER_EMOJI` - starting catalog entry name
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(size) = parse::<f32>(&lookup, "CRITTERS_MAP_SIZE") {
            if size.is_finite() && size > 0.0 {
                config.map_size = size;
            }
        }
        if let Some(ms) = parse::<u64>(&lookup, "CRITTERS_TICK_MS") {
            config.tick_ms = ms.max(1);
        }
        config.world_path = non_empty(&lookup, "CRITTERS_WORLD_PATH").map(PathBuf::from);

        if let Some(source) =
            non_empty(&lookup, "CRITTERS_ASSET_SET").and_then(|name| AssetSource::from_name(&name))
        {
            config.asset_source = source;
        }
        // A custom template keeps the key style of the chosen set.
        if let Some(template) = non_empty(&lookup, "CRITTERS_ASSET_TEMPLATE") {
            config.asset_source.template = template;
        }

        if let Some(dir) = non_empty(&lookup, "CRITTERS_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(units) = parse::<f32>(&lookup, "CRITTERS_CELL_UNITS") {
            if units.is_finite() && units >= 1.0 {
                config.cell_units = units;
            }
        }
        config.player_emoji = non_empty(&lookup, "CRITTERS_PLAYER_EMOJI");

        config
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    non_empty(lookup, key)?.parse().ok()
}

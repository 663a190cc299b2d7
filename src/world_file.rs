//! Polls a JSON world snapshot file for changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

use crate::core::WorldSnapshot;

/// A snapshot file re-read whenever its modification time moves.
#[derive(Debug, Clone)]
pub struct WorldFile {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl WorldFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot if the file changed since the last poll.
    ///
    /// A file that fails to parse is not retried until it changes again.
    /// Filesystems without modification times are re-read on every poll.
    pub fn poll(&mut self) -> Result<Option<WorldSnapshot>> {
        let meta = fs::metadata(&self.path)
            .with_context(|| format!("stat world file {}", self.path.display()))?;
        let modified = meta.modified().ok();
        if modified.is_some() && modified == self.modified {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read world file {}", self.path.display()))?;
        self.modified = modified;
        let snapshot = WorldSnapshot::from_json(&text)
            .with_context(|| format!("parse world file {}", self.path.display()))?;
        Ok(Some(snapshot))
    }
}

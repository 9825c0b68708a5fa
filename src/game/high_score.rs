//! Best-score persistence.

use crate::core::constants::HIGH_SCORE_FILE;
use crate::utils::persistence::{
    load_json_or_default_at, remove_file_if_exists, save_json_at, save_path,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Where the best score lives between sessions.
pub trait HighScoreStore {
    /// Stored best score, or 0 when nothing usable is stored.
    fn load(&self) -> u32;

    /// Record a new best score.
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// On-disk record (~/.flappy/high_score.json).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub best: u32,
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the home directory.
    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(save_path(HIGH_SCORE_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forget the stored best score.
    pub fn clear(&self) -> io::Result<()> {
        remove_file_if_exists(&self.path)
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load(&self) -> u32 {
        load_json_or_default_at::<HighScoreRecord>(&self.path).best
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        save_json_at(&self.path, &HighScoreRecord { best: score })
    }
}

/// In-memory store for tests and `--no-save` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub best: u32,
    /// Number of successful `save` calls.
    pub writes: u32,
}

impl MemoryHighScoreStore {
    pub fn with_best(best: u32) -> Self {
        Self { best, writes: 0 }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.best = score;
        self.writes += 1;
        Ok(())
    }
}

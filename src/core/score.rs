//! High score persistence.
//!
//! The game core talks to a small storage capability so tests can substitute
//! an in-memory store. The file-backed store keeps a single JSON object,
//! `{"highScore": <n>}`, and treats anything missing or malformed as 0.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::HIGH_SCORE_KEY;

/// Storage capability for the persisted high score.
pub trait HighScoreStore {
    /// Read the persisted high score. Missing or unparseable data reads as 0.
    fn load(&self) -> u32;

    /// Persist a new high score.
    fn save(&mut self, score: u32) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(rename = "highScore")]
    high_score: u32,
}

/// File-backed store, one JSON object per file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default on-disk location: `$HOME/.tui-2048/highscore.json`, falling
    /// back to the working directory when HOME is unset.
    pub fn default_location() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".tui-2048").join("highscore.json"),
            None => PathBuf::from("highscore.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return 0;
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
            return 0;
        };
        value
            .get(HIGH_SCORE_KEY)
            .and_then(serde_json::Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        let record = HighScoreRecord { high_score: score };
        let raw = serde_json::to_string_pretty(&record)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        fs::write(&self.path, raw)
            .with_context(|| format!("writing high score to {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    high_score: u32,
    saves: u32,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            high_score: initial,
            saves: 0,
        }
    }

    /// Number of times `save` has been called.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.high_score
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new(0);
        assert_eq!(store.load(), 0);

        store.save(300).unwrap();
        assert_eq!(store.load(), 300);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_json_store_missing_file_defaults_to_zero() {
        let store = JsonFileStore::new("/nonexistent/path/highscore.json");
        assert_eq!(store.load(), 0);
    }
}

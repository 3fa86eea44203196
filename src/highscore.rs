//! High score persistence
//!
//! The only state this game persists: a single integer in a small JSON file.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// File-backed high score store
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored high score. A missing or unparsable file means "no
    /// high score yet"; startup never fails on it.
    pub fn load(&self) -> u32 {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return 0,
        };

        match serde_json::from_str::<HighScoreFile>(&contents) {
            Ok(file) => file.high_score,
            Err(e) => {
                warn!("Ignoring unparsable high score file: {}", e);
                0
            }
        }
    }

    /// Write a new high score, best-effort (tmp file + rename so a crash
    /// mid-write never corrupts the stored value). Failures are logged and
    /// swallowed; the in-memory score already advanced.
    pub fn save(&self, high_score: u32) {
        let json = match serde_json::to_vec(&HighScoreFile { high_score }) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode high score: {}", e);
                return;
            }
        };

        let tmp = self.path.with_extension("json.tmp");
        let result = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = result {
            warn!("Failed to persist high score: {}", e);
        }
    }
}

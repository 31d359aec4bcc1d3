//! Persistent top-10 list of finished sessions.
//!
//! Stored as JSON under the user's data directory, e.g.
//! `~/.local/share/term-tetris/high_scores.json` on Linux.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// Entries kept on the list
pub const MAX_ENTRIES: usize = 10;

const FILE_NAME: &str = "high_scores.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub lines: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Where the list lives unless overridden
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("term-tetris")
            .join(FILE_NAME)
    }

    /// Read the list at `path`; a missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading high scores from {}", path.display()))
            }
        };
        let mut scores: HighScores = serde_json::from_str(&text)
            .with_context(|| format!("parsing high scores in {}", path.display()))?;
        scores.normalize();
        Ok(scores)
    }

    /// Write the list to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing high scores to {}", path.display()))?;
        Ok(())
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Insert a finished session and return its 1-based rank.
    ///
    /// Ties rank with the first equal entry. A score that does not make the
    /// list ranks `MAX_ENTRIES + 1`.
    pub fn record(&mut self, entry: ScoreEntry) -> usize {
        let i = self.position(entry.score);
        self.entries.insert(i, entry);
        self.entries.truncate(MAX_ENTRIES);
        let rank = i.min(MAX_ENTRIES) + 1;
        info!("recorded score {} at rank {rank}", entry.score);
        rank
    }

    /// Rank `score` would get, without recording it
    pub fn rank_of(&self, score: u32) -> usize {
        self.position(score).min(MAX_ENTRIES) + 1
    }

    /// Index of the first entry not strictly better than `score`
    fn position(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|e| e.score <= score)
            .unwrap_or(self.entries.len())
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}

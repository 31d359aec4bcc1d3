//! Game tunables
//!
//! Everything the rules leave open - board size, gravity cadence, the score
//! table, the kick table - lives in [`GameConfig`]. It deserializes from TOML
//! with every field optional:
//!
//! ```toml
//! width = 10
//! line_scores = [0, 100, 250, 400, 800]
//! kicks = [0, -1, 1, -2, 2]
//! ghost_enabled = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pieces::spawn_column;
use crate::scoring::{get_drop_interval_ms, get_soft_drop_interval_ms, ScoreTable};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, BLOCK_SIZE};

/// Smallest and largest accepted board side
const MIN_SIDE: usize = BLOCK_SIZE;
const MAX_SIDE: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Gravity interval at level 1
    pub base_gravity_ms: u32,
    /// How much faster gravity gets per level
    pub gravity_step_ms: u32,
    /// Fastest gravity interval regardless of level
    pub gravity_floor_ms: u32,
    /// Gravity divisor while soft drop is held
    pub soft_drop_multiplier: u32,
    pub line_scores: ScoreTable,
    /// Lines needed per level-up
    pub lines_per_level: u32,
    /// Horizontal offsets tried, in order, when a rotation collides
    pub kicks: Vec<i32>,
    /// Whether the landing projection starts switched on
    pub ghost_enabled: bool,
    /// Points per row moved by a soft-drop step
    pub soft_drop_points: u32,
    /// Points per row fallen during a hard drop
    pub hard_drop_points: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH as usize,
            height: BOARD_HEIGHT as usize,
            base_gravity_ms: 500,
            gravity_step_ms: 40,
            gravity_floor_ms: 100,
            soft_drop_multiplier: 5,
            line_scores: ScoreTable::CLASSIC,
            lines_per_level: 10,
            kicks: vec![0, -1, 1, -2, 2, -3, 3],
            ghost_enabled: true,
            soft_drop_points: 0,
            hard_drop_points: 0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = |field: &'static str, v: usize| {
            if (MIN_SIDE..=MAX_SIDE).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{v} is outside {MIN_SIDE}..={MAX_SIDE}"),
                })
            }
        };
        side("width", self.width)?;
        side("height", self.height)?;

        if self.kicks.is_empty() {
            return Err(invalid("kicks", "at least one offset is required"));
        }
        if self.lines_per_level == 0 {
            return Err(invalid("lines_per_level", "must be at least 1"));
        }
        if self.soft_drop_multiplier == 0 {
            return Err(invalid("soft_drop_multiplier", "must be at least 1"));
        }
        if self.base_gravity_ms == 0 {
            return Err(invalid("base_gravity_ms", "must be at least 1"));
        }
        if !self.line_scores.is_monotonic() {
            return Err(invalid(
                "line_scores",
                "clearing more lines at once must be worth strictly more per line",
            ));
        }
        Ok(())
    }

    /// Column new pieces spawn at
    pub fn spawn_column(&self) -> i32 {
        spawn_column(self.width)
    }

    /// Gravity interval at `level`, accelerated when soft drop is held
    pub fn gravity_interval_ms(&self, level: u32, soft_drop: bool) -> u32 {
        let base = get_drop_interval_ms(
            level,
            self.base_gravity_ms,
            self.gravity_step_ms,
            self.gravity_floor_ms,
        );
        if soft_drop {
            get_soft_drop_interval_ms(base, self.soft_drop_multiplier)
        } else {
            base
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 15);
        assert_eq!(config.height, 20);
        assert_eq!(config.spawn_column(), 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            width = 10
            line_scores = [0, 100, 250, 400, 800]
            ghost_enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 20);
        assert_eq!(config.line_scores, ScoreTable::GENTLE);
        assert!(!config.ghost_enabled);
        assert_eq!(config.kicks, vec![0, -1, 1, -2, 2, -3, 3]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = GameConfig::from_toml_str("hold_enabled = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_name_the_field() {
        let cases = [
            ("width = 2", "width"),
            ("height = 100", "height"),
            ("kicks = []", "kicks"),
            ("lines_per_level = 0", "lines_per_level"),
            ("soft_drop_multiplier = 0", "soft_drop_multiplier"),
            ("line_scores = [0, 100, 200, 300, 400]", "line_scores"),
        ];
        for (toml, expected) in cases {
            match GameConfig::from_toml_str(toml) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("{toml}: expected invalid {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "height = 24\nsoft_drop_points = 1").unwrap();
        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.height, 24);
        assert_eq!(config.soft_drop_points, 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn gravity_interval_follows_level_and_soft_drop() {
        let config = GameConfig::default();
        assert_eq!(config.gravity_interval_ms(1, false), 500);
        assert_eq!(config.gravity_interval_ms(1, true), 100);
        assert_eq!(config.gravity_interval_ms(3, false), 420);
        assert_eq!(config.gravity_interval_ms(30, false), 100);
        assert_eq!(config.gravity_interval_ms(30, true), 20);
    }
}

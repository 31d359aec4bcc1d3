//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules: the shape catalog, the board, the state
//! machine and scoring. It does no I/O apart from reading a config file and
//! never sleeps, so the same seed and the same commands always produce the
//! same game.
//!
//! # Module Structure
//!
//! - [`pieces`]: 4x4 shape masks for all 7 kinds and 4 rotations, plus the
//!   horizontal kick search
//! - [`board`]: resizable grid with collision checks and line clearing
//! - [`game_state`]: active piece, next piece, counters and every rule
//! - [`scoring`]: score tables, levels and gravity cadence
//! - [`rng`]: seeded uniform piece generator
//! - [`config`]: tunables and their TOML loader
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use term_tetris_core::{GameConfig, GameState, Phase};
//! use term_tetris_types::Command;
//!
//! let mut game = GameState::new(GameConfig::default(), 12345);
//! game.start();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert_eq!(game.phase(), Phase::Falling);
//! assert_eq!(game.pieces_spawned(), 2);
//! ```
//!
//! # Timing
//!
//! The core has no clock. A driver calls
//! [`GameState::gravity_tick`](game_state::GameState::gravity_tick) every
//! [`GameState::gravity_interval_ms`](game_state::GameState::gravity_interval_ms)
//! and feeds at most one command per input poll in between.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use game_state::{GameState, LockEvent, Phase, Piece, StepOutcome};
pub use pieces::{get_shape, shape_cell, try_rotate, SHAPES};
pub use rng::PieceGenerator;
pub use scoring::{calculate_drop_score, calculate_level, ScoreTable};
pub use snapshot::GameSnapshot;

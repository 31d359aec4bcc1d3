//! Terminal Tetris (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/` and are re-exported
//! here as `term_tetris::{core, input, term, types}`. This crate adds the
//! pieces a playable program needs on top: the gravity clock
//! ([`session`]) and the persistent score list ([`high_scores`]).

pub use term_tetris_core as core;
pub use term_tetris_input as input;
pub use term_tetris_term as term;
pub use term_tetris_types as types;

pub mod high_scores;
pub mod session;

pub use high_scores::{HighScores, ScoreEntry};
pub use session::Session;

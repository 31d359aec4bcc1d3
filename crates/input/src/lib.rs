//! Terminal input module
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and polls the
//! terminal for at most one command at a time. Terminals report key repeats
//! but rarely key releases, so a held key shows up as a stream of the same
//! command; callers that care about "held" (soft drop) watch for the stream
//! drying up.

pub mod map;

pub use term_tetris_types as types;

pub use map::{map_key, poll_command};

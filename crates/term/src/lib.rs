//! Terminal rendering for the game.
//!
//! A small, game-oriented pipeline: [`GameView`] draws a snapshot into a
//! [`FrameBuffer`], and [`TerminalRenderer`] sends the cells that changed to
//! the terminal. No widget toolkit; board cells are two columns wide so they
//! look square in most fonts.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{ordinal, GameView, Hud, Viewport};
pub use renderer::{encode_changes, encode_frame, TerminalRenderer};

//! Read-only view of a session for renderers
//!
//! A snapshot owns its own copy of the grid, so a renderer can hold one
//! across frames and refill it with
//! [`GameState::snapshot_into`](crate::GameState::snapshot_into) without
//! reallocating.

use crate::board::Board;
use crate::game_state::{Phase, Piece};
use crate::types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Locked cells only; the active piece and ghost are separate
    pub board: Board,
    pub active: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: PieceKind,
    pub phase: Phase,
    pub started: bool,
    pub paused: bool,
    pub ghost_enabled: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    /// Empty snapshot for a `width x height` board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board: Board::new(width, height),
            active: None,
            ghost: None,
            next: PieceKind::I,
            phase: Phase::Falling,
            started: false,
            paused: false,
            ghost_enabled: true,
            score: 0,
            level: 1,
            lines: 0,
        }
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.started && self.phase == Phase::Falling && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new(
            crate::types::BOARD_WIDTH as usize,
            crate::types::BOARD_HEIGHT as usize,
        )
    }
}

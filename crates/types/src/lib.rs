//! Shared types - piece kinds, rotations, input commands and board constants
//!
//! Everything in here is plain data. The simulation core, the input mapper and
//! the terminal view all speak these types, so none of them needs to depend on
//! another just to agree on what an `I` piece or a hard drop is.
//!
//! # Board Dimensions
//!
//! The default playfield is wider than the guideline 10 columns:
//!
//! - **Width**: 15 columns (indexed 0-14)
//! - **Height**: 20 rows (indexed 0-19), plus one buffer row at `y = -1`
//!   where pieces spawn
//!
//! Both are tunable through the core's `GameConfig`; the constants below are
//! only the defaults.
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{Command, PieceKind, Rotation};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.symbol(), 'T');
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert!(Command::Quit.allowed_while_paused());
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (15 columns)
pub const BOARD_WIDTH: u8 = 15;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square mask every shape lives in
pub const BLOCK_SIZE: usize = 4;

/// Row a freshly spawned piece's mask starts on (one row above the board)
pub const SPAWN_ROW: i32 = -1;

/// The seven tetromino piece kinds
///
/// The declaration order is the catalog index order: `I, O, T, S, Z, J, L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Number of distinct kinds
    pub const COUNT: usize = 7;

    /// Catalog index (0..7)
    pub const fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::index`]; `None` outside 0..7
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Letter stamped into the board for cells of this kind
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let c = c.to_ascii_uppercase();
        Self::ALL.into_iter().find(|k| k.symbol() == c)
    }
}

/// Rotation states, clockwise from the spawn orientation
///
/// - **North**: rotation index 0 (spawn)
/// - **East**: index 1, one clockwise quarter turn
/// - **South**: index 2
/// - **West**: index 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Number of clockwise quarter turns from `North`
    pub const fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for `index` quarter turns, taken modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use term_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use term_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Logical commands delivered by the input source, at most one per poll
///
/// A poll without input is `Option::<Command>::None`; the core treats it as a
/// valid "nothing happened" tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Shift one column left
    MoveLeft,
    /// Shift one column right
    MoveRight,
    /// Rotate 90° clockwise, with horizontal kicks
    Rotate,
    /// Rotate 90° counter-clockwise, with horizontal kicks
    RotateCcw,
    /// Move down exactly one row (locks if blocked)
    SoftDropStep,
    /// Accelerate gravity while held
    SoftDropHold,
    /// Drop to the lowest legal row and lock
    HardDrop,
    TogglePause,
    ToggleGhost,
    Quit,
    Restart,
}

impl Command {
    /// Commands still honoured while the game is paused
    pub fn allowed_while_paused(&self) -> bool {
        matches!(
            self,
            Command::TogglePause | Command::ToggleGhost | Command::Quit
        )
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied by a locked piece of that kind
pub type Cell = Option<PieceKind>;

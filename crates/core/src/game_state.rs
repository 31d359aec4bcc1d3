//! Game state module - the rules state machine
//!
//! Ties the board, the shape catalog, the piece generator and scoring
//! together. Every operation is synchronous and never fails: an illegal move
//! is a silent `false`, and the only terminal outcome is game over.
//!
//! A session moves through `spawn -> falling -> lock -> clear -> spawn` until a
//! spawn collides or a piece locks while still partly above row 0. Pause is an
//! orthogonal flag on top of the falling phase.

use log::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_drop_score, calculate_level};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, PieceKind, Rotation, SPAWN_ROW};

/// A positioned tetromino; `(x, y)` is the top-left corner of its 4x4 mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// A piece at spawn orientation with its mask at column `x` of the
    /// buffer row
    pub fn spawn(kind: PieceKind, x: i32) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y: SPAWN_ROW,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Board coordinates of the four minos
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x + i32::from(dx), self.y + i32::from(dy)))
    }

    /// Copy shifted by `(dx, dy)` and turned to `rotation`
    pub fn moved(&self, dx: i32, dy: i32, rotation: Rotation) -> Self {
        Self {
            rotation,
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether any mino is still above the visible board
    pub fn is_above_board(&self) -> bool {
        self.cells().iter().any(|&(_, y)| y < 0)
    }
}

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is in play (possibly paused)
    Falling,
    /// A spawn collided or a piece locked above the board
    GameOver,
    /// The player ended the session
    Quit,
}

/// Result of a downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved down one row
    Moved,
    /// The piece locked and the next one spawned
    Locked,
    /// The piece could not lock or the next could not spawn
    ToppedOut,
    /// Nothing in play
    Ignored,
}

/// What the last lock did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Line clear points awarded (drop bonus excluded)
    pub points: u32,
    pub level_up: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    next_kind: PieceKind,
    generator: PieceGenerator,
    phase: Phase,
    paused: bool,
    ghost_enabled: bool,
    started: bool,
    score: u32,
    level: u32,
    lines: u32,
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// A fresh, not yet started session
    ///
    /// `config` is taken as given; validate it first if it came from a user.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let board = Board::new(config.width, config.height);
        Self::with_board(config, seed, board)
    }

    /// A fresh session on a pre-filled board
    ///
    /// The board's own dimensions win over the configured ones.
    pub fn with_board(mut config: GameConfig, seed: u64, board: Board) -> Self {
        config.width = board.width();
        config.height = board.height();
        let mut generator = PieceGenerator::new(seed);
        let next_kind = generator.next_kind();
        Self {
            ghost_enabled: config.ghost_enabled,
            config,
            board,
            active: None,
            next_kind,
            generator,
            phase: Phase::Falling,
            paused: false,
            started: false,
            score: 0,
            level: 1,
            lines: 0,
            pieces_spawned: 0,
            last_event: None,
        }
    }

    /// Start the session and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether the session has ended, by top-out or by quitting
    pub fn is_finished(&self) -> bool {
        self.phase != Phase::Falling
    }

    /// Started, not finished and not paused
    pub fn is_playing(&self) -> bool {
        self.started && self.phase == Phase::Falling && !self.paused
    }

    pub fn ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Gravity interval for the current level
    pub fn gravity_interval_ms(&self, soft_drop: bool) -> u32 {
        self.config.gravity_interval_ms(self.level, soft_drop)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Whether `piece` may stand where it is
    pub fn fits(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| !self.board.is_blocked(x, y))
    }

    /// Bring the next kind into play at the spawn position
    ///
    /// On success a new next kind is drawn. On collision the session ends.
    pub fn spawn(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        let piece = Piece::spawn(self.next_kind, self.config.spawn_column());
        if !self.fits(&piece) {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(
                "spawn blocked for {:?}; game over with score {} at level {}",
                piece.kind, self.score, self.level
            );
            return false;
        }

        self.active = Some(piece);
        self.next_kind = self.generator.next_kind();
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!("spawned {:?}, next {:?}", piece.kind, self.next_kind);
        true
    }

    /// Whether the active piece could be shifted by `(dx, dy)` at `rotation`
    ///
    /// Pure; false when no piece is in play.
    pub fn can_move(&self, dx: i32, dy: i32, rotation: Rotation) -> bool {
        self.active
            .is_some_and(|piece| self.fits(&piece.moved(dx, dy, rotation)))
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if !self.fits(&piece.moved(dx, dy, piece.rotation)) {
            return false;
        }
        self.active = Some(piece.moved(dx, dy, piece.rotation));
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.is_playing() && self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_playing() && self.try_shift(1, 0)
    }

    /// Rotate a quarter turn, trying each horizontal kick in table order
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let kicked = try_rotate(piece.rotation, clockwise, &self.config.kicks, |dx, rot| {
            self.fits(&piece.moved(dx, 0, rot))
        });
        match kicked {
            Some((rotation, dx)) => {
                self.active = Some(piece.moved(dx, 0, rotation));
                true
            }
            None => false,
        }
    }

    fn step_down(&mut self) -> StepOutcome {
        if !self.is_playing() || self.active.is_none() {
            return StepOutcome::Ignored;
        }
        if self.try_shift(0, 1) {
            return StepOutcome::Moved;
        }
        if self.lock() {
            StepOutcome::Locked
        } else {
            StepOutcome::ToppedOut
        }
    }

    /// Player-driven one-row drop; locks when blocked
    pub fn soft_drop(&mut self) -> StepOutcome {
        let outcome = self.step_down();
        if outcome == StepOutcome::Moved {
            self.add_score(calculate_drop_score(1, self.config.soft_drop_points));
        }
        outcome
    }

    /// Gravity-driven one-row drop; locks when blocked
    pub fn gravity_tick(&mut self) -> StepOutcome {
        self.step_down()
    }

    /// Drop straight to the landing row and lock
    pub fn hard_drop(&mut self) -> StepOutcome {
        if !self.is_playing() {
            return StepOutcome::Ignored;
        }
        let Some(piece) = self.active else {
            return StepOutcome::Ignored;
        };

        let distance = self.drop_distance(&piece);
        let landed = piece.moved(0, distance, piece.rotation);
        self.active = Some(landed);

        if !landed.is_above_board() {
            self.add_score(calculate_drop_score(
                distance as u32,
                self.config.hard_drop_points,
            ));
        }
        if self.lock() {
            StepOutcome::Locked
        } else {
            StepOutcome::ToppedOut
        }
    }

    /// Merge the active piece, clear lines, score and spawn the next piece
    ///
    /// Returns whether the session continues. A piece with any mino above
    /// row 0 ends the session instead and leaves the board untouched.
    pub fn lock(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        if piece.is_above_board() {
            self.phase = Phase::GameOver;
            info!(
                "{:?} locked above the board; game over with score {} at level {}",
                piece.kind, self.score, self.level
            );
            return false;
        }

        if !self.board.lock_piece(&piece.cells(), piece.kind) {
            // Only reachable if the board was changed under a live piece.
            warn!("{:?} overlapped the stack on lock", piece.kind);
            self.phase = Phase::GameOver;
            return false;
        }
        self.active = None;

        let cleared = self.board.clear_full_rows();
        let points = self.config.line_scores.points(cleared, self.level);
        let level_before = self.level;
        self.add_score(points);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = calculate_level(self.lines, self.config.lines_per_level);

        if cleared > 0 {
            debug!(
                "cleared {cleared} line(s) for {points}; lines {} level {}",
                self.lines, self.level
            );
        }
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            points,
            level_up: self.level > level_before,
        });

        self.spawn()
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Rows `piece` can fall before it is blocked
    fn drop_distance(&self, piece: &Piece) -> i32 {
        let mut distance = 0;
        while self.fits(&piece.moved(0, distance + 1, piece.rotation)) {
            distance += 1;
        }
        distance
    }

    /// Where the active piece would land, computed fresh each call
    pub fn ghost_piece(&self) -> Option<Piece> {
        let piece = self.active?;
        let distance = self.drop_distance(&piece);
        Some(piece.moved(0, distance, piece.rotation))
    }

    /// Landing projection as it should be drawn
    ///
    /// `None` while the ghost is switched off, the session is over, or the
    /// piece is already resting on its landing row.
    pub fn ghost(&self) -> Option<Piece> {
        if !self.ghost_enabled || !self.started || self.phase != Phase::Falling {
            return None;
        }
        let active = self.active?;
        self.ghost_piece().filter(|ghost| ghost.y != active.y)
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.phase != Phase::Falling {
            return false;
        }
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        true
    }

    pub fn toggle_ghost(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.ghost_enabled = !self.ghost_enabled;
        true
    }

    /// End the session at the player's request
    pub fn quit(&mut self) -> bool {
        if self.phase == Phase::Quit {
            return false;
        }
        self.phase = Phase::Quit;
        self.paused = false;
        info!("quit with score {} at level {}", self.score, self.level);
        true
    }

    /// Empty the board, zero the counters and spawn a fresh piece
    ///
    /// Refused while paused or after quitting. The generator keeps running,
    /// so a restart does not replay the previous sequence.
    pub fn restart(&mut self) -> bool {
        if self.paused || self.phase == Phase::Quit {
            return false;
        }
        self.board.clear();
        self.active = None;
        self.phase = Phase::Falling;
        self.started = true;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.pieces_spawned = 0;
        self.last_event = None;
        self.next_kind = self.generator.next_kind();
        info!("restarted");
        self.spawn();
        true
    }

    /// Apply one input command
    ///
    /// Returns whether the command changed anything. While paused only
    /// pause, ghost and quit are honoured. `SoftDropHold` is accepted here
    /// but does nothing to the state; the scheduler that owns gravity
    /// speeds up while it is held.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.paused && !command.allowed_while_paused() {
            return false;
        }
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(true),
            Command::RotateCcw => self.rotate(false),
            Command::SoftDropStep => self.soft_drop() != StepOutcome::Ignored,
            Command::SoftDropHold => self.is_playing(),
            Command::HardDrop => self.hard_drop() != StepOutcome::Ignored,
            Command::TogglePause => self.toggle_pause(),
            Command::ToggleGhost => self.toggle_ghost(),
            Command::Quit => self.quit(),
            Command::Restart => self.restart(),
        }
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.copy_from(&self.board);
        out.active = self.active;
        out.ghost = self.ghost();
        out.next = self.next_kind;
        out.phase = self.phase;
        out.started = self.started;
        out.paused = self.paused;
        out.ghost_enabled = self.ghost_enabled;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(self.board.width(), self.board.height());
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

//! Integration tests for whole sessions through the public API

use term_tetris::core::{Board, GameConfig, GameState, Phase, StepOutcome};
use term_tetris::session::Session;
use term_tetris::types::{Command, PieceKind, Rotation};
use term_tetris::{HighScores, ScoreEntry};

/// First seed whose opening piece is `kind`
fn seed_opening_with(kind: PieceKind) -> u64 {
    (0..10_000)
        .find(|&seed| GameState::new(GameConfig::default(), seed).next_kind() == kind)
        .expect("some seed opens with every kind")
}

fn start_on(board: Board, kind: PieceKind) -> GameState {
    let mut game = GameState::with_board(GameConfig::default(), seed_opening_with(kind), board);
    game.start();
    assert_eq!(game.active().unwrap().kind, kind);
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(GameConfig::default(), 12345);
    assert!(!game.started());
    assert!(game.active().is_none());

    game.start();
    assert!(game.started());
    assert!(game.is_playing());
    let active = game.active().unwrap();
    assert_eq!((active.x, active.y, active.rotation), (5, -1, Rotation::North));

    assert!(game.apply(Command::Quit));
    assert_eq!(game.phase(), Phase::Quit);
}

#[test]
fn test_vertical_i_into_single_gap_clears_a_line() {
    let mut board = Board::new(15, 20);
    for x in 0..15 {
        if x != 6 {
            board.set(x, 19, Some(PieceKind::J));
        }
    }
    let mut game = start_on(board, PieceKind::I);

    assert!(game.apply(Command::HardDrop));
    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 40);
    assert_eq!(game.level(), 1);
    assert_eq!(game.board().filled_count(), 3);
    let event = game.take_last_event().unwrap();
    assert_eq!((event.lines_cleared, event.points), (1, 40));
}

#[test]
fn test_four_line_clear_uses_table() {
    let mut board = Board::new(15, 20);
    for y in 16..20 {
        for x in 0..15 {
            if x != 6 {
                board.set(x, y, Some(PieceKind::L));
            }
        }
    }
    let mut game = start_on(board, PieceKind::I);

    assert_eq!(game.hard_drop(), StepOutcome::Locked);
    assert_eq!(game.lines(), 4);
    assert_eq!(game.score(), 1200);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_rotation_at_left_wall_kicks_one_right() {
    let mut game = start_on(Board::new(15, 20), PieceKind::I);
    while game.move_left() {}
    assert_eq!(game.active().unwrap().x, -1);

    assert!(game.apply(Command::Rotate));
    let piece = game.active().unwrap();
    assert_eq!(piece.rotation, Rotation::East);
    assert_eq!(piece.x, 0);
}

#[test]
fn test_rotation_with_no_legal_kick_changes_nothing() {
    let mut board = Board::new(15, 20);
    for x in 1..15 {
        board.set(x, 10, Some(PieceKind::Z));
        board.set(x, 11, Some(PieceKind::Z));
    }
    let mut game = start_on(board, PieceKind::I);
    while game.move_left() {}
    for _ in 0..10 {
        assert_eq!(game.soft_drop(), StepOutcome::Moved);
    }
    let before = game.active().unwrap();
    assert_eq!((before.x, before.y), (-1, 9));

    assert!(!game.apply(Command::Rotate));
    assert!(!game.apply(Command::RotateCcw));
    assert_eq!(game.active(), Some(before));
}

#[test]
fn test_lock_above_board_ends_game_without_touching_grid() {
    let mut board = Board::new(15, 20);
    board.set(6, 3, Some(PieceKind::T));
    let mut game = start_on(board.clone(), PieceKind::I);

    assert_eq!(game.hard_drop(), StepOutcome::ToppedOut);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.board(), &board);
}

#[test]
fn test_ghost_follows_active_piece() {
    let mut game = start_on(Board::new(15, 20), PieceKind::I);
    let ghost = game.ghost().unwrap();
    assert_eq!(ghost.y, 16);
    assert_eq!(ghost.x, game.active().unwrap().x);

    game.apply(Command::MoveRight);
    assert_eq!(game.ghost().unwrap().x, ghost.x + 1);

    game.apply(Command::ToggleGhost);
    assert!(game.ghost().is_none());
    assert!(game.snapshot().ghost.is_none());
}

#[test]
fn test_pause_then_resume() {
    let mut session = Session::new(start_on(Board::new(15, 20), PieceKind::T));
    let before = session.game().active();

    session.handle(Command::TogglePause);
    session.handle(Command::HardDrop);
    session.advance(5_000);
    assert_eq!(session.game().active(), before);

    session.handle(Command::TogglePause);
    session.advance(500);
    assert_eq!(session.game().active().unwrap().y, before.unwrap().y + 1);
}

#[test]
fn test_play_until_game_over_then_record_and_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let mut game = GameState::new(GameConfig::default(), 99);
    game.start();
    while !game.is_finished() {
        game.apply(Command::HardDrop);
    }
    assert!(game.game_over());

    let mut scores = HighScores::load(&path).unwrap();
    let rank = scores.record(ScoreEntry {
        score: game.score(),
        level: game.level(),
        lines: game.lines(),
    });
    assert_eq!(rank, 1);
    scores.save(&path).unwrap();
    assert_eq!(HighScores::load(&path).unwrap().entries().len(), 1);

    assert!(game.apply(Command::Restart));
    assert!(game.is_playing());
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_narrow_board_from_config() {
    let config = GameConfig::from_toml_str("width = 4\nheight = 8").unwrap();
    let mut game = GameState::new(config, 1);
    game.start();
    assert_eq!(game.board().width(), 4);
    assert_eq!(game.active().unwrap().x, 0);

    let mut drops = 0;
    while !game.is_finished() {
        game.apply(Command::HardDrop);
        drops += 1;
        assert!(drops < 200);
    }
}

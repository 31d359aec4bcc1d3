//! Property tests for the rules core.
//!
//! Random seeds and random command streams drive a session while the checks
//! below must hold after every step:
//! - `can_move` never admits a cell outside the walls or below the floor.
//! - The ghost never overlaps locked cells and is stable across queries.
//! - Score and lines never decrease; level always matches the line count.

use proptest::prelude::*;
use term_tetris::core::{calculate_level, GameConfig, GameState};
use term_tetris::types::{Command, Rotation};

fn command() -> impl Strategy<Value = Command> {
    prop::sample::select(vec![
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::RotateCcw,
        Command::SoftDropStep,
        Command::SoftDropHold,
        Command::HardDrop,
        Command::ToggleGhost,
        Command::TogglePause,
    ])
}

fn rotation() -> impl Strategy<Value = Rotation> {
    (0usize..4).prop_map(Rotation::from_index)
}

proptest! {
    #[test]
    fn can_move_stays_inside_walls_and_floor(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 0..60),
        dx in -20i32..20,
        dy in -20i32..20,
        rot in rotation(),
    ) {
        let mut game = GameState::new(GameConfig::default(), seed);
        game.start();
        for cmd in commands {
            game.apply(cmd);
        }
        prop_assume!(game.active().is_some());

        let piece = game.active().unwrap().moved(dx, dy, rot);
        if game.can_move(dx, dy, rot) {
            let (w, h) = (game.board().width() as i32, game.board().height() as i32);
            for (x, y) in piece.cells() {
                prop_assert!((0..w).contains(&x), "x = {} admitted", x);
                prop_assert!(y < h, "y = {} admitted", y);
                prop_assert!(!game.board().is_occupied(x, y));
            }
        }
    }

    #[test]
    fn ghost_is_stable_and_never_overlaps(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 0..120),
    ) {
        let mut game = GameState::new(GameConfig::default(), seed);
        game.start();
        for cmd in commands {
            game.apply(cmd);
            if let Some(ghost) = game.ghost_piece() {
                prop_assert_eq!(game.ghost_piece(), Some(ghost));
                for (x, y) in ghost.cells() {
                    prop_assert!(!game.board().is_occupied(x, y));
                }
                let active = game.active().unwrap();
                prop_assert_eq!(ghost.x, active.x);
                prop_assert!(ghost.y >= active.y);
                prop_assert!(!game.fits(&ghost.moved(0, 1, ghost.rotation)));
            }
        }
    }

    #[test]
    fn counters_are_monotonic_and_level_consistent(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..200),
    ) {
        let mut game = GameState::new(GameConfig::default(), seed);
        game.start();
        let (mut score, mut lines) = (0, 0);
        for cmd in commands {
            game.apply(cmd);
            game.gravity_tick();
            prop_assert!(game.score() >= score);
            prop_assert!(game.lines() >= lines);
            prop_assert_eq!(game.level(), calculate_level(game.lines(), 10));
            score = game.score();
            lines = game.lines();
            if game.is_finished() {
                break;
            }
        }
    }
}

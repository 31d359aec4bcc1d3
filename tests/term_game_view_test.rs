use term_tetris::core::{GameConfig, GameState};
use term_tetris::term::{encode_changes, encode_frame, FrameBuffer, GameView, Hud, Viewport};
use term_tetris::types::Command;

#[test]
fn game_view_renders_a_live_game() {
    let mut game = GameState::new(GameConfig::default(), 42);
    game.start();
    game.apply(Command::HardDrop);

    let view = GameView::default();
    let fb = view.render(&game.snapshot(), &Hud::default(), Viewport::new(80, 24));

    assert_eq!((fb.width(), fb.height()), (80, 24));
    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("NEXT"));
    assert!(fb.glyphs().iter().any(|g| g.ch == '█'));
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let mut game = GameState::new(GameConfig::default(), 7);
    game.start();
    let view = GameView::default();
    let mut snap = game.snapshot();
    let mut fb = FrameBuffer::new(0, 0);

    for (w, h) in [(80, 24), (120, 40), (40, 10)] {
        game.snapshot_into(&mut snap);
        view.render_into(&snap, &Hud::default(), Viewport::new(w, h), &mut fb);
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}

#[test]
fn unchanged_frame_produces_minimal_diff() {
    let mut game = GameState::new(GameConfig::default(), 7);
    game.start();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let a = view.render(&game.snapshot(), &Hud::default(), vp);

    let mut same = Vec::new();
    encode_changes(&a, &a, &mut same).unwrap();
    let mut full = Vec::new();
    encode_frame(&a, &mut full).unwrap();
    assert!(same.len() < full.len() / 10);

    game.apply(Command::MoveRight);
    let b = view.render(&game.snapshot(), &Hud::default(), vp);
    let mut diff = Vec::new();
    encode_changes(&a, &b, &mut diff).unwrap();
    assert!(diff.len() > same.len());
}

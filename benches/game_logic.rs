use criterion::{black_box, criterion_group, criterion_main, Criterion};
use term_tetris::core::{Board, GameConfig, GameState};
use term_tetris::session::{Session, TICK_MS};
use term_tetris::types::{Command, PieceKind};

fn started() -> GameState {
    let mut state = GameState::new(GameConfig::default(), 12345);
    state.start();
    state
}

fn bench_frame(c: &mut Criterion) {
    let mut session = Session::new(started());

    c.bench_function("session_advance_16ms", |b| {
        b.iter(|| {
            if session.game().is_finished() {
                session.handle(Command::Restart);
            }
            session.advance(black_box(TICK_MS));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(15, 20);
            for y in 16..20 {
                for x in 0..15 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("spawn", |b| {
        b.iter(|| {
            black_box(state.spawn());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("move_right_left", |b| {
        b.iter(|| {
            state.move_right();
            state.move_left();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(state.rotate(true));
        })
    });
}

fn bench_ghost(c: &mut Criterion) {
    let state = started();

    c.bench_function("ghost", |b| b.iter(|| black_box(state.ghost())));
}

criterion_group!(
    benches,
    bench_frame,
    bench_line_clear,
    bench_spawn,
    bench_move,
    bench_rotate,
    bench_ghost
);
criterion_main!(benches);

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tick_tetris::core::{try_rotate, Board, Game, Piece};
use tick_tetris::types::{Event, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::with_seed(22, 10, 2, 12345);
    let mut now = Duration::ZERO;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += Duration::from_millis(16);
            game.update(black_box(Event::None), now);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut full = Board::new(22, 10);
    for row in 18..22 {
        for col in 0..10 {
            full.set(row, col, Some(0));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter_batched(
            || full.clone(),
            |mut board| black_box(board.clear()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_hold_spawn(c: &mut Criterion) {
    c.bench_function("hold_and_spawn", |b| {
        b.iter_batched(
            || Game::with_seed(22, 10, 2, 12345),
            |mut game| {
                game.update(Event::Hold, Duration::ZERO);
                game
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::new(22, 10);
    let mut piece = Piece::new(PieceKind::T);
    piece.set_position(10, 4);

    c.bench_function("try_rotate", |b| {
        b.iter(|| try_rotate(black_box(&piece), true, |p| board.fits(p)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hold_spawn,
    bench_try_rotate
);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use slide_2048::engine::{self, Cell, Grid, Move};
use slide_2048::game::Game;
use std::hint::black_box;

fn corpus() -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut grids = Vec::new();
    // Empty and two-tile starts
    let mut g = Grid::new(4).unwrap();
    grids.push(g.clone());
    engine::spawn_tile(&mut g, &mut rng);
    engine::spawn_tile(&mut g, &mut rng);
    grids.push(g.clone());
    // Derive a variety of densities deterministically
    for i in 0..20 {
        let dir = Move::ALL[i % Move::ALL.len()];
        let (mut next, slide) = engine::shifted(&g, dir);
        if slide.changed() {
            engine::spawn_tile(&mut next, &mut rng);
            g = next;
        }
        grids.push(g.clone());
    }
    grids
}

fn bench_shift_line(c: &mut Criterion) {
    let lines: [[Cell; 4]; 4] = [
        [Some(2), Some(2), Some(2), Some(2)],
        [None, Some(4), None, Some(4)],
        [Some(2), Some(4), Some(8), Some(16)],
        [None, None, None, None],
    ];
    c.bench_function("line/shift", |bch| {
        bch.iter(|| {
            let mut acc = 0u64;
            for line in &lines {
                let mut l = *line;
                acc += engine::shift_line(&mut l, false).points;
                let mut l = *line;
                acc += engine::shift_line(&mut l, true).points;
            }
            black_box(acc)
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{}", dir), |bch| {
            let grids = corpus();
            bch.iter(|| {
                let mut acc = 0u64;
                for g in &grids {
                    acc += engine::shifted(g, dir).1.points;
                }
                black_box(acc)
            })
        });
    }
}

fn bench_game(c: &mut Criterion) {
    c.bench_function("grid/spawn_tile", |bch| {
        bch.iter_batched(
            || (Grid::new(4).unwrap(), StdRng::seed_from_u64(7)),
            |(mut g, mut rng)| {
                for _ in 0..16 {
                    engine::spawn_tile(&mut g, &mut rng);
                }
                black_box(g)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("game/advance_cycle", |bch| {
        bch.iter_batched(
            || Game::seeded(4, 9).unwrap(),
            |mut game| {
                for i in 0..32 {
                    game.advance(Move::ALL[i % 4]);
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("grid/is_game_over", |bch| {
        let grids = corpus();
        bch.iter(|| black_box(grids.iter().filter(|g| engine::is_game_over(g)).count()))
    });
}

criterion_group!(benches, bench_shift_line, bench_shift, bench_game);
criterion_main!(benches);

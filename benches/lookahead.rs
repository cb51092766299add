use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use slide_2048::engine::Move;
use slide_2048::game::Game;
use slide_2048::lookahead::{Lookahead, LookaheadConfig};
use std::hint::black_box;

fn midgame() -> Game {
    let mut game = Game::seeded(4, 1337).unwrap();
    for i in 0..40 {
        game.advance(Move::ALL[i % 4]);
    }
    game
}

fn bench_best_move(c: &mut Criterion) {
    let game = midgame();
    let mut group = c.benchmark_group("lookahead/best_move");
    group.sample_size(20);
    for depth in 1..=5u32 {
        let cfg = LookaheadConfig { depth, ..LookaheadConfig::default() };
        group.bench_with_input(BenchmarkId::from_parameter(depth), &cfg, |bch, cfg| {
            let mut la = Lookahead::seeded(cfg.clone(), 3);
            bch.iter(|| black_box(la.advise(&game)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_best_move);
criterion_main!(benches);

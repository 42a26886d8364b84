use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use slither::env::{GameConfig, Vec2D};
use slither::game::Game;
use slither::grid::Grid;
use slither::search;

fn path_empty_grid(c: &mut Criterion) {
    let grid = Grid::new(20);
    let snake = VecDeque::from(vec![Vec2D::new(0, 0)]);

    c.bench_function("path_empty_grid", |b| {
        b.iter(|| search::find_path(&grid, black_box(&snake), Vec2D::new(19, 19), 0.5))
    });
}

fn path_long_snake(c: &mut Criterion) {
    let grid = Grid::new(20);
    // Body coiled between head and goal.
    let mut snake: VecDeque<Vec2D> = VecDeque::from(vec![Vec2D::new(0, 10)]);
    snake.extend((2..18).map(|y| Vec2D::new(8, y)));
    snake.extend((2..18).rev().map(|y| Vec2D::new(10, y)));

    c.bench_function("path_long_snake", |b| {
        b.iter(|| search::find_path(&grid, black_box(&snake), Vec2D::new(19, 10), 0.5))
    });
}

fn game_ticks(c: &mut Criterion) {
    c.bench_function("game_ticks", |b| {
        b.iter(|| {
            let rng = SmallRng::seed_from_u64(black_box(42));
            let mut game = Game::new(GameConfig::default(), rng).unwrap();
            for _ in 0..200 {
                if game.over() {
                    break;
                }
                game.tick();
            }
            game.score()
        })
    });
}

criterion_group!(benches, path_empty_grid, path_long_snake, game_ticks);
criterion_main!(benches);

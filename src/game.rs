use std::collections::VecDeque;
use std::fmt::{self, Debug};

use log::debug;
use owo_colors::OwoColorize;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::env::{ConfigError, Direction, GameConfig, Vec2D};
use crate::grid::Grid;
use crate::search;

/// The observable state of one play-through.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Episode {
    /// head to tail
    pub snake: VecDeque<Vec2D>,
    pub food: Vec2D,
    pub score: usize,
    pub over: bool,
}

/// Drives the snake along the computed paths, one cell per tick.
///
/// The game owns the current path. It is recomputed from scratch at episode
/// start, whenever food is eaten and when the old path is used up. Once
/// `over` is set only [`Game::reset`] gets the snake moving again.
pub struct Game {
    config: GameConfig,
    grid: Grid,
    rng: SmallRng,
    episode: Episode,
    path: VecDeque<Vec2D>,
}

impl Game {
    pub fn new(config: GameConfig, rng: SmallRng) -> Result<Game, ConfigError> {
        config.validate()?;
        let mut game = Game {
            config,
            grid: Grid::new(config.grid_size),
            rng,
            episode: Episode {
                snake: VecDeque::new(),
                food: Vec2D::default(),
                score: 0,
                over: false,
            },
            path: VecDeque::new(),
        };
        game.reset();
        Ok(game)
    }

    /// Starts a fresh episode: single-segment snake, food in the opposite
    /// quadrant, score zero.
    pub fn reset(&mut self) -> &Episode {
        let n = self.config.grid_size as i16;
        self.episode.snake.clear();
        self.episode.snake.push_front(Vec2D::new(n / 4, n / 4));
        self.episode.food = Vec2D::new(3 * n / 4, 3 * n / 4);
        self.episode.score = 0;
        self.episode.over = false;
        self.repath();
        &self.episode
    }

    /// Advances the world by one step and returns the updated state.
    pub fn tick(&mut self) -> &Episode {
        if self.episode.over {
            return &self.episode;
        }

        if self.path.is_empty() {
            self.repath();
        }
        let Some(next) = self.path.pop_front() else {
            self.episode.over = true;
            return &self.episode;
        };

        if !self.grid.has(next) || self.episode.snake.contains(&next) {
            debug!("snake died at {next:?}");
            self.episode.over = true;
            return &self.episode;
        }

        self.episode.snake.push_front(next);

        if next == self.episode.food {
            self.episode.score += 1;
            debug!("ate food at {next:?}, score {}", self.episode.score);
            if !self.place_food() {
                // The snake covers the whole grid.
                self.episode.over = true;
                return &self.episode;
            }
            self.repath();
        } else {
            self.episode.snake.pop_back();
        }
        &self.episode
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn snake(&self) -> &VecDeque<Vec2D> {
        &self.episode.snake
    }

    pub fn food(&self) -> Vec2D {
        self.episode.food
    }

    pub fn score(&self) -> usize {
        self.episode.score
    }

    pub fn over(&self) -> bool {
        self.episode.over
    }

    fn repath(&mut self) {
        self.path = search::find_path(
            &self.grid,
            &self.episode.snake,
            self.episode.food,
            self.config.avoidance_factor,
        )
        .into();
    }

    /// Picks a uniformly random free cell for the next food. Returns false
    /// if no free cell is left.
    fn place_food(&mut self) -> bool {
        let n = self.config.grid_size;
        if self.episode.snake.len() >= n * n {
            return false;
        }
        loop {
            let p = Vec2D::new(
                self.rng.gen_range(0..n) as i16,
                self.rng.gen_range(0..n) as i16,
            );
            if !self.episode.snake.contains(&p) {
                self.episode.food = p;
                return true;
            }
        }
    }
}

impl Game {
    /// Parses the textual board representation used in tests.
    /// `.` free, `o` food, `0` head, `^>v<` body pointing towards the head.
    pub fn parse(txt: &str) -> Option<Game> {
        let txt = txt.trim();

        #[derive(PartialEq)]
        enum RawCell {
            Free,
            Food,
            Head,
            Body(Direction),
        }

        let raw_cells: Vec<RawCell> = txt
            .lines()
            .rev()
            .flat_map(|l| {
                l.split_whitespace().flat_map(|s| {
                    s.chars().next().map(|c| match c {
                        'o' => RawCell::Food,
                        '0' => RawCell::Head,
                        '^' => RawCell::Body(Direction::Up),
                        '>' => RawCell::Body(Direction::Right),
                        'v' => RawCell::Body(Direction::Down),
                        '<' => RawCell::Body(Direction::Left),
                        _ => RawCell::Free,
                    })
                })
            })
            .collect();

        let size = txt.lines().count();
        if raw_cells.len() != size * size {
            return None;
        }
        let grid = Grid::new(size);

        let head = raw_cells.iter().position(|c| *c == RawCell::Head)?;
        let mut p = Vec2D::new((head % size) as _, (head / size) as _);
        let mut snake = VecDeque::new();
        snake.push_back(p);
        while let Some(next) = Direction::iter().find_map(|d| {
            let next = p.apply(d);
            if grid.has(next)
                && raw_cells[next.x as usize + next.y as usize * size] == RawCell::Body(d.invert())
            {
                Some(next)
            } else {
                None
            }
        }) {
            p = next;
            snake.push_back(p);
        }

        let food = raw_cells.iter().position(|c| *c == RawCell::Food)?;
        let food = Vec2D::new((food % size) as _, (food / size) as _);

        Some(Game {
            config: GameConfig {
                grid_size: size,
                ..GameConfig::default()
            },
            grid,
            rng: SmallRng::seed_from_u64(0),
            episode: Episode {
                snake,
                food,
                score: 0,
                over: false,
            },
            path: VecDeque::new(),
        })
    }
}

impl Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Clone, Copy)]
        enum FmtCell {
            Free,
            Food,
            Body(Direction),
            Head,
        }
        impl Debug for FmtCell {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    FmtCell::Free => write!(f, "."),
                    FmtCell::Food => write!(f, "{}", "o".red()),
                    FmtCell::Body(dir) => match dir {
                        Direction::Up => write!(f, "{}", "^".green()),
                        Direction::Right => write!(f, "{}", ">".green()),
                        Direction::Down => write!(f, "{}", "v".green()),
                        Direction::Left => write!(f, "{}", "<".green()),
                    },
                    FmtCell::Head => write!(f, "{}", "0".bright_green()),
                }
            }
        }

        let size = self.grid.size;
        let mut cells = vec![FmtCell::Free; size * size];
        cells[self.episode.food.x as usize + self.episode.food.y as usize * size] = FmtCell::Food;

        // tail to head, arrows point towards the head
        let mut segments = self.episode.snake.iter().rev().copied();
        if let Some(mut last) = segments.next() {
            for next in segments {
                cells[last.x as usize + last.y as usize * size] =
                    FmtCell::Body(Direction::from(next - last));
                last = next;
            }
            cells[last.x as usize + last.y as usize * size] = FmtCell::Head;
        }

        writeln!(f, "Game {{")?;
        for y in (0..size).rev() {
            write!(f, "  ")?;
            for x in 0..size {
                write!(f, "{:?} ", cells[x + y * size])?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  score: {}, over: {}", self.episode.score, self.episode.over)?;
        write!(f, "}}")
    }
}

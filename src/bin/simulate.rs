use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use slither::env::GameConfig;
use slither::game::Game;
use slither::{logging, savegame};

/// Play self-running snake games to completion.
#[derive(Parser)]
#[command(name = "slither simulate", about = "Play self-running snake games.")]
struct Opts {
    /// Width and height of the grid.
    #[arg(long, default_value_t = 20)]
    grid_size: usize,
    /// Penalty for cells next to the snake's own body.
    #[arg(long, default_value_t = 0.5)]
    avoidance_factor: f64,
    /// Number of games to play.
    #[arg(short, long, default_value_t = 1)]
    game_count: usize,
    /// Abort a game after this many turns.
    #[arg(long, default_value_t = 10_000)]
    max_turns: usize,
    /// Seed for the food placement. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Directory for the JSON game records.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Print the board after every turn.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    logging();

    let Opts {
        grid_size,
        avoidance_factor,
        game_count,
        max_turns,
        seed,
        log_dir,
        verbose,
    } = Opts::parse();

    let config = GameConfig {
        grid_size,
        avoidance_factor,
    };
    let seed = seed.unwrap_or_else(|| SmallRng::from_entropy().gen());
    info!("seed {seed}");

    let mut total = 0;
    for i in 0..game_count {
        let rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
        let mut game = Game::new(config, rng).expect("invalid configuration");

        let mut turn = 0;
        while !game.over() && turn < max_turns {
            game.tick();
            turn += 1;

            if verbose {
                println!("{turn}: {game:?}");
            }
            if let Some(dir) = &log_dir {
                if let Err(e) = savegame::save(game.episode(), &format!("{seed}.{i}"), turn, dir) {
                    warn!("could not record game: {e}");
                }
            }
        }

        info!("game {i}: score {} after {turn} turns", game.score());
        total += game.score();
    }

    println!("Result: {total} points over {game_count} games");
}

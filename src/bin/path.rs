use clap::Parser;
use log::info;

use slither::game::Episode;
use slither::grid::Grid;
use slither::{logging, search};

/// Compute the snake's next path for a given state.
#[derive(Parser)]
#[command(name = "slither path", about = "Compute the snake's next path.")]
struct Opts {
    /// JSON episode state.
    #[arg(value_parser = parse_episode)]
    episode: Episode,
    /// Width and height of the grid.
    #[arg(long, default_value_t = 20)]
    grid_size: usize,
    /// Penalty for cells next to the snake's own body.
    #[arg(long, default_value_t = 0.5)]
    avoidance_factor: f64,
}

fn parse_episode(s: &str) -> Result<Episode, serde_json::Error> {
    serde_json::from_str(s)
}

fn main() {
    logging();

    let Opts {
        episode,
        grid_size,
        avoidance_factor,
    } = Opts::parse();

    let grid = Grid::new(grid_size);
    let path = search::find_path(&grid, &episode.snake, episode.food, avoidance_factor);

    info!("{} steps to {:?}", path.len(), episode.food);
    println!("{}", serde_json::to_string(&path).unwrap_or_default());
}

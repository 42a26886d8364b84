use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::game::Episode;

#[derive(Serialize)]
struct Record<'a> {
    turn: usize,
    #[serde(flatten)]
    episode: &'a Episode,
}

/// Appends the episode state to `<log_dir>/<game_id>.json`, one record per
/// line and turn.
pub fn save(episode: &Episode, game_id: &str, turn: usize, log_dir: &Path) -> io::Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(format!("{game_id}.json")))?;
    serde_json::to_writer(&mut file, &Record { turn, episode })
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writeln!(file)
}

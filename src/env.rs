use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vec2D {
    pub x: i16,
    pub y: i16,
}

impl Vec2D {
    pub fn new(x: i16, y: i16) -> Vec2D {
        Vec2D { x, y }
    }

    pub fn apply(self, d: Direction) -> Vec2D {
        self + d.into()
    }

    pub fn manhattan(&self) -> u64 {
        self.x.unsigned_abs() as u64 + self.y.unsigned_abs() as u64
    }
}

impl From<(i16, i16)> for Vec2D {
    fn from(val: (i16, i16)) -> Self {
        Vec2D::new(val.0, val.1)
    }
}

impl From<Direction> for Vec2D {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Vec2D::new(0, 1),
            Direction::Right => Vec2D::new(1, 0),
            Direction::Down => Vec2D::new(0, -1),
            Direction::Left => Vec2D::new(-1, 0),
        }
    }
}

impl Add for Vec2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// N, E, S, W.
    pub fn iter() -> impl Iterator<Item = Direction> {
        [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]
        .iter()
        .copied()
    }

    pub fn invert(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl From<Vec2D> for Direction {
    fn from(p: Vec2D) -> Direction {
        if p.x < 0 {
            Direction::Left
        } else if p.x > 0 {
            Direction::Right
        } else if p.y < 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Simulation parameters, provided by the driver at construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid.
    pub grid_size: usize,
    /// Cost surcharge for cells within Manhattan distance 1 of a non-head
    /// body segment. Additive per segment.
    pub avoidance_factor: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            avoidance_factor: 0.5,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // One cell for the snake and one for the food is the bare minimum.
        if self.grid_size < 2 {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !self.avoidance_factor.is_finite() || self.avoidance_factor < 0.0 {
            return Err(ConfigError::AvoidanceFactor(self.avoidance_factor));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    GridSize(usize),
    AvoidanceFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridSize(n) => {
                write!(f, "grid size {n} is too small, at least 2 is required")
            }
            ConfigError::AvoidanceFactor(w) => {
                write!(f, "avoidance factor {w} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod test {

    #[test]
    fn manhattan() {
        use super::*;
        assert_eq!((Vec2D::new(5, 5) - Vec2D::new(15, 15)).manhattan(), 20);
        assert_eq!((Vec2D::new(3, 0) - Vec2D::new(0, 4)).manhattan(), 7);
        assert_eq!((Vec2D::new(2, 2) - Vec2D::new(2, 2)).manhattan(), 0);
    }

    #[test]
    fn config_validation() {
        use super::*;
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(
            GameConfig {
                grid_size: 0,
                ..GameConfig::default()
            }
            .validate(),
            Err(ConfigError::GridSize(0))
        );
        assert_eq!(
            GameConfig {
                grid_size: 1,
                ..GameConfig::default()
            }
            .validate(),
            Err(ConfigError::GridSize(1))
        );
        assert!(GameConfig {
            avoidance_factor: -1.0,
            ..GameConfig::default()
        }
        .validate()
        .is_err());
        assert!(GameConfig {
            avoidance_factor: f64::NAN,
            ..GameConfig::default()
        }
        .validate()
        .is_err());
    }
}

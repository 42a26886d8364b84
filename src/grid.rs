use crate::env::Vec2D;

/// The square playing field. Cells outside of it are deadly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub size: usize,
}

impl Grid {
    pub fn new(size: usize) -> Grid {
        Grid { size }
    }

    /// Returns if the point lies on the grid.
    pub fn has(&self, p: Vec2D) -> bool {
        0 <= p.x && p.x < self.size as _ && 0 <= p.y && p.y < self.size as _
    }
}

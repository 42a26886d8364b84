use std::collections::{HashMap, VecDeque};

use crate::env::{Direction, Vec2D};
use crate::grid::Grid;

/// Relative position of the goal as seen from a cell.
///
/// The diagonal cases alternate between an x-first and a y-first move order
/// depending on the parity of the cell, which makes the search prefer
/// staircase paths over L-shaped ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    UpRight,
    DownRight,
    UpLeft,
    DownLeft,
    Right,
    Left,
    Up,
    Down,
}

impl Heading {
    fn new(from: Vec2D, to: Vec2D) -> Heading {
        match ((to.x - from.x).signum(), (to.y - from.y).signum()) {
            (1, 1) => Heading::UpRight,
            (1, -1) => Heading::DownRight,
            (-1, 1) => Heading::UpLeft,
            (-1, -1) => Heading::DownLeft,
            (1, 0) => Heading::Right,
            (-1, 0) => Heading::Left,
            (0, 1) => Heading::Up,
            _ => Heading::Down,
        }
    }

    /// The order in which neighbors of `p` are offered to the frontier.
    /// This only shapes tie-breaking, the costs still decide the path.
    fn moves(self, p: Vec2D) -> [Direction; 4] {
        use Direction as D;
        let even = (p.x + p.y) % 2 == 0;
        match self {
            Heading::UpRight if even => [D::Right, D::Up, D::Left, D::Down],
            Heading::UpRight => [D::Up, D::Right, D::Down, D::Left],
            Heading::DownRight if even => [D::Right, D::Down, D::Left, D::Up],
            Heading::DownRight => [D::Down, D::Right, D::Up, D::Left],
            Heading::UpLeft if even => [D::Left, D::Up, D::Right, D::Down],
            Heading::UpLeft => [D::Up, D::Left, D::Down, D::Right],
            Heading::DownLeft if even => [D::Left, D::Down, D::Right, D::Up],
            Heading::DownLeft => [D::Down, D::Left, D::Up, D::Right],
            Heading::Right => [D::Right, D::Up, D::Down, D::Left],
            Heading::Left => [D::Left, D::Up, D::Down, D::Right],
            Heading::Up => [D::Up, D::Right, D::Left, D::Down],
            Heading::Down => [D::Down, D::Right, D::Left, D::Up],
        }
    }
}

/// Cost of entering `cell`: one unit step plus `avoidance` for every body
/// segment except the head within Manhattan distance 1. The surcharges add
/// up, so the body repels paths softly instead of blocking them.
fn step_cost(cell: Vec2D, body: &VecDeque<Vec2D>, avoidance: f64) -> f64 {
    let near = body
        .iter()
        .skip(1)
        .filter(|&&s| (s - cell).manhattan() <= 1)
        .count();
    1.0 + near as f64 * avoidance
}

/// Best-first search over the grid. Body cells are not obstacles, they only
/// carry the avoidance surcharge.
///
/// The frontier is scanned linearly for the minimum estimate, so equal
/// estimates resolve to the earliest inserted node. This keeps the neighbor
/// order of `moves` in charge of tie-breaking.
///
/// Returns the path from `start` (exclusive) to `goal` (inclusive), or `None`
/// if the frontier runs dry first.
fn best_first(
    grid: &Grid,
    body: &VecDeque<Vec2D>,
    start: Vec2D,
    goal: Vec2D,
    avoidance: f64,
    moves: impl Fn(Vec2D) -> [Direction; 4],
) -> Option<Vec<Vec2D>> {
    // predecessor and cost so far for every discovered cell
    let mut nodes: HashMap<Vec2D, (Vec2D, f64)> = HashMap::new();
    nodes.insert(start, (start, 0.0));

    let mut frontier = vec![((goal - start).manhattan() as f64, start)];

    while !frontier.is_empty() {
        let mut min = 0;
        for i in 1..frontier.len() {
            if frontier[i].0 < frontier[min].0 {
                min = i;
            }
        }
        let (_, current) = frontier.remove(min);

        if current == goal {
            let mut path = Vec::new();
            let mut p = current;
            while p != start {
                path.push(p);
                p = nodes[&p].0;
            }
            path.reverse();
            return Some(path);
        }

        let cost = nodes[&current].1;
        for d in moves(current) {
            let neighbor = current.apply(d);
            if !grid.has(neighbor) {
                continue;
            }

            let neighbor_cost = cost + step_cost(neighbor, body, avoidance);
            if nodes.get(&neighbor).map_or(true, |&(_, c)| neighbor_cost < c) {
                nodes.insert(neighbor, (current, neighbor_cost));
                let estimate = neighbor_cost + (goal - neighbor).manhattan() as f64;
                frontier.push((estimate, neighbor));
            }
        }
    }

    None
}

/// Last resort when the search fails: walk to the goal column, then to the
/// goal row, ignoring everything on the way. The result may run through the
/// body, collisions are the game's concern.
fn naive_path(start: Vec2D, goal: Vec2D) -> Vec<Vec2D> {
    let mut path = Vec::with_capacity((goal - start).manhattan() as usize);
    let mut p = start;
    while p.x != goal.x {
        p.x += (goal.x - p.x).signum();
        path.push(p);
    }
    while p.y != goal.y {
        p.y += (goal.y - p.y).signum();
        path.push(p);
    }
    path
}

/// Computes the path from the snake's head to `goal`.
///
/// The returned cells run from the cell after the head up to and including
/// the goal. An empty path means the head already sits on the goal.
pub fn find_path(grid: &Grid, body: &VecDeque<Vec2D>, goal: Vec2D, avoidance: f64) -> Vec<Vec2D> {
    let Some(&start) = body.front() else {
        return Vec::new();
    };

    let path = if start.x == goal.x || start.y == goal.y {
        // Already aligned with the goal, no staircase needed.
        best_first(grid, body, start, goal, avoidance, |_| {
            [
                Direction::Up,
                Direction::Right,
                Direction::Down,
                Direction::Left,
            ]
        })
    } else {
        best_first(grid, body, start, goal, avoidance, |p| {
            Heading::new(p, goal).moves(p)
        })
    };

    path.unwrap_or_else(|| naive_path(start, goal))
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    #[test]
    fn heading_move_orders() {
        use super::*;
        use Direction::*;

        let goal = Vec2D::new(10, 10);
        // Even and odd cells alternate between x-first and y-first.
        assert_eq!(
            Heading::new(Vec2D::new(0, 0), goal).moves(Vec2D::new(0, 0)),
            [Right, Up, Left, Down]
        );
        assert_eq!(
            Heading::new(Vec2D::new(1, 0), goal).moves(Vec2D::new(1, 0)),
            [Up, Right, Down, Left]
        );

        let goal = Vec2D::new(0, 0);
        assert_eq!(
            Heading::new(Vec2D::new(4, 4), goal).moves(Vec2D::new(4, 4)),
            [Left, Down, Right, Up]
        );
        assert_eq!(
            Heading::new(Vec2D::new(4, 3), goal).moves(Vec2D::new(4, 3)),
            [Down, Left, Up, Right]
        );

        // Straight cases ignore parity.
        assert_eq!(
            Heading::new(Vec2D::new(0, 5), Vec2D::new(9, 5)).moves(Vec2D::new(0, 5)),
            [Right, Up, Down, Left]
        );
        assert_eq!(
            Heading::new(Vec2D::new(5, 9), Vec2D::new(5, 0)).moves(Vec2D::new(5, 9)),
            [Down, Right, Left, Up]
        );
    }

    #[test]
    fn step_cost_additive() {
        use super::*;

        // Head does not count, adjacent and overlapping segments do.
        let body = VecDeque::from(vec![
            Vec2D::new(5, 5),
            Vec2D::new(5, 6),
            Vec2D::new(6, 6),
            Vec2D::new(7, 6),
        ]);
        assert_eq!(step_cost(Vec2D::new(5, 5), &body, 0.5), 1.5);
        assert_eq!(step_cost(Vec2D::new(5, 6), &body, 0.5), 2.0);
        assert_eq!(step_cost(Vec2D::new(6, 6), &body, 0.5), 2.5);
        assert_eq!(step_cost(Vec2D::new(0, 0), &body, 0.5), 1.0);
        assert_eq!(step_cost(Vec2D::new(6, 6), &body, 0.0), 1.0);
    }

    #[test]
    fn path_optimal_on_empty_grid() {
        use super::*;

        let grid = Grid::new(10);
        let targets = [
            (Vec2D::new(0, 0), Vec2D::new(9, 9)),
            (Vec2D::new(0, 9), Vec2D::new(9, 0)),
            (Vec2D::new(3, 7), Vec2D::new(8, 2)),
            (Vec2D::new(5, 5), Vec2D::new(5, 0)),
            (Vec2D::new(0, 4), Vec2D::new(9, 4)),
            (Vec2D::new(1, 2), Vec2D::new(2, 8)),
        ];
        for (start, goal) in targets {
            let body = VecDeque::from(vec![start]);
            let path = find_path(&grid, &body, goal, 0.5);
            assert_eq!(path.len() as u64, (goal - start).manhattan());
            assert_eq!(*path.last().unwrap(), goal);
        }
    }

    #[test]
    fn path_within_bounds_and_unique() {
        use super::*;

        let grid = Grid::new(10);
        // Long body next to the route.
        let body = VecDeque::from(vec![
            Vec2D::new(0, 0),
            Vec2D::new(1, 0),
            Vec2D::new(2, 0),
            Vec2D::new(2, 1),
            Vec2D::new(2, 2),
            Vec2D::new(2, 3),
            Vec2D::new(1, 3),
        ]);
        let path = find_path(&grid, &body, Vec2D::new(9, 8), 0.5);

        assert_eq!(*path.last().unwrap(), Vec2D::new(9, 8));
        let mut seen = HashSet::new();
        for &p in &path {
            assert!(grid.has(p));
            assert!(seen.insert(p), "cell {p:?} visited twice");
        }
    }

    #[test]
    fn path_empty_if_on_goal() {
        use super::*;

        let grid = Grid::new(10);
        let body = VecDeque::from(vec![Vec2D::new(4, 4)]);
        assert!(find_path(&grid, &body, Vec2D::new(4, 4), 0.5).is_empty());
    }

    #[test]
    fn path_first_episode() {
        use super::*;

        // The initial situation of a default game.
        let grid = Grid::new(20);
        let body = VecDeque::from(vec![Vec2D::new(5, 5)]);
        let path = find_path(&grid, &body, Vec2D::new(15, 15), 0.5);

        assert_eq!(path.len(), 20);
        assert_eq!(*path.last().unwrap(), Vec2D::new(15, 15));
        assert!(!path.contains(&Vec2D::new(5, 5)));
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
    }

    #[test]
    fn naive_fallback_shape() {
        use super::*;

        let path = naive_path(Vec2D::new(2, 7), Vec2D::new(5, 3));
        assert_eq!(
            path,
            vec![
                Vec2D::new(3, 7),
                Vec2D::new(4, 7),
                Vec2D::new(5, 7),
                Vec2D::new(5, 6),
                Vec2D::new(5, 5),
                Vec2D::new(5, 4),
                Vec2D::new(5, 3),
            ]
        );
        assert!(naive_path(Vec2D::new(3, 3), Vec2D::new(3, 3)).is_empty());
    }

    #[test]
    fn path_avoids_body_when_cheaper() {
        use super::*;

        // A body wall right of the head. With avoidance the path goes around
        // the penalty zone, without it hugs the wall.
        let grid = Grid::new(10);
        let body = VecDeque::from(vec![
            Vec2D::new(0, 2),
            Vec2D::new(2, 0),
            Vec2D::new(2, 1),
            Vec2D::new(2, 2),
            Vec2D::new(2, 3),
            Vec2D::new(2, 4),
        ]);
        let goal = Vec2D::new(5, 2);

        let plain = find_path(&grid, &body, goal, 0.0);
        assert_eq!(plain.len() as u64, (goal - Vec2D::new(0, 2)).manhattan());

        let avoiding = find_path(&grid, &body, goal, 0.5);
        assert_eq!(*avoiding.last().unwrap(), goal);
        // The detour costs steps but saves surcharges.
        assert!(avoiding.len() >= plain.len());
    }
}

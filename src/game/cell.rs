//! Cell struct for grid positions

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::config::{GRID_SIZE, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// A position on the game grid. Coordinates are pixel values quantized to
/// `GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a new cell
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one grid unit away in the given direction.
    /// Does not wrap; leaving the playfield is a wall collision, which the
    /// caller detects with [`Cell::in_bounds`].
    pub fn step(&self, direction: Direction) -> Cell {
        let (dx, dy) = match direction {
            Direction::Up => (0, -GRID_SIZE),
            Direction::Down => (0, GRID_SIZE),
            Direction::Left => (-GRID_SIZE, 0),
            Direction::Right => (GRID_SIZE, 0),
        };

        Cell::new(self.x + dx, self.y + dy)
    }

    /// Whether the cell lies inside the playfield
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < PLAYFIELD_WIDTH && self.y >= 0 && self.y < PLAYFIELD_HEIGHT
    }

    /// A uniformly random grid-aligned cell inside the playfield
    pub fn random(rng: &mut impl Rng) -> Self {
        let max_x = PLAYFIELD_WIDTH / GRID_SIZE;
        let max_y = PLAYFIELD_HEIGHT / GRID_SIZE;

        let x = rng.gen_range(0..max_x) * GRID_SIZE;
        let y = rng.gen_range(0..max_y) * GRID_SIZE;

        Cell::new(x, y)
    }

    /// The grid-aligned center of the playfield
    pub fn board_center() -> Self {
        let x = PLAYFIELD_WIDTH / (2 * GRID_SIZE) * GRID_SIZE;
        let y = PLAYFIELD_HEIGHT / (2 * GRID_SIZE) * GRID_SIZE;
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_step() {
        let cell = Cell::new(100, 100);

        assert_eq!(cell.step(Direction::Up), Cell::new(100, 80));
        assert_eq!(cell.step(Direction::Down), Cell::new(100, 120));
        assert_eq!(cell.step(Direction::Left), Cell::new(80, 100));
        assert_eq!(cell.step(Direction::Right), Cell::new(120, 100));
    }

    #[test]
    fn test_no_wrap_at_edges() {
        // Stepping off an edge leaves the playfield instead of wrapping
        let left = Cell::new(0, 100);
        assert_eq!(left.step(Direction::Left).x, -GRID_SIZE);
        assert!(!left.step(Direction::Left).in_bounds());

        let right = Cell::new(PLAYFIELD_WIDTH - GRID_SIZE, 100);
        assert_eq!(right.step(Direction::Right).x, PLAYFIELD_WIDTH);
        assert!(!right.step(Direction::Right).in_bounds());
    }

    #[test]
    fn test_in_bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(PLAYFIELD_WIDTH - GRID_SIZE, PLAYFIELD_HEIGHT - GRID_SIZE).in_bounds());
        assert!(!Cell::new(-GRID_SIZE, 0).in_bounds());
        assert!(!Cell::new(PLAYFIELD_WIDTH, 0).in_bounds());
        assert!(!Cell::new(0, PLAYFIELD_HEIGHT).in_bounds());
    }

    #[test]
    fn test_random_is_grid_aligned() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let cell = Cell::random(&mut rng);
            assert!(cell.in_bounds());
            assert_eq!(cell.x % GRID_SIZE, 0);
            assert_eq!(cell.y % GRID_SIZE, 0);
        }
    }

    #[test]
    fn test_board_center_is_aligned() {
        let center = Cell::board_center();
        assert!(center.in_bounds());
        assert_eq!(center.x % GRID_SIZE, 0);
        assert_eq!(center.y % GRID_SIZE, 0);
    }
}

//! Snake entity

use std::collections::VecDeque;

use super::cell::Cell;
use super::direction::Direction;
use crate::protocol::CellData;

/// The player's snake. Body segments are ordered head-first; the body is
/// never empty and never reordered, it only grows by prepending a head or
/// shrinks by dropping the tail.
#[derive(Debug, Clone)]
pub struct Snake {
    /// Body segments (head is front, tail is back)
    body: VecDeque<Cell>,
    /// Current movement heading
    heading: Direction,
}

impl Snake {
    /// Spawn a snake of `length` segments with its head at `head`, extended
    /// away from the heading so the first advance is always legal.
    pub fn spawn(head: Cell, heading: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length);
        body.push_front(head);

        let mut current = head;
        for _ in 1..length {
            current = current.step(opposite(heading));
            body.push_back(current);
        }

        Self { body, heading }
    }

    /// Get the snake's head cell
    pub fn head(&self) -> Cell {
        *self.body.front().expect("snake body is never empty")
    }

    /// Get the current heading
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Commit a new heading. The caller is responsible for rejecting
    /// reversals; see `InputTracker::press`.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Number of body segments
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// All body cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Whether any segment occupies `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend a new head one grid unit along the current heading.
    /// Does NOT trim the tail; whether the tail shrinks depends on food
    /// consumption that tick, which is the session's call.
    pub fn advance(&mut self) {
        let new_head = self.head().step(self.heading);
        self.body.push_front(new_head);
    }

    /// Drop the tail segment
    pub fn trim_tail(&mut self) {
        self.body.pop_back();
    }

    /// Whether the head overlaps any non-head segment
    pub fn hit_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Convert to wire data for snapshot messages
    pub fn to_data(&self) -> Vec<CellData> {
        self.cells()
            .map(|cell| CellData { x: cell.x, y: cell.y })
            .collect()
    }
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_extends_behind_head() {
        let snake = Snake::spawn(Cell::new(300, 300), Direction::Right, 3);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(300, 300));
        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells[1], Cell::new(280, 300));
        assert_eq!(cells[2], Cell::new(260, 300));
    }

    #[test]
    fn test_advance_prepends_without_trimming() {
        let mut snake = Snake::spawn(Cell::new(300, 300), Direction::Right, 3);

        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(320, 300));

        snake.trim_tail();
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_hit_self() {
        let mut snake = Snake::spawn(Cell::new(100, 100), Direction::Right, 5);
        assert!(!snake.hit_self());

        // Turn a tight box: right, down, left, up lands back on the body
        snake.advance();
        snake.trim_tail();
        snake.set_heading(Direction::Down);
        snake.advance();
        snake.trim_tail();
        snake.set_heading(Direction::Left);
        snake.advance();
        snake.trim_tail();
        snake.set_heading(Direction::Up);
        snake.advance();
        snake.trim_tail();

        assert!(snake.hit_self());
    }

    #[test]
    fn test_occupies() {
        let snake = Snake::spawn(Cell::new(100, 100), Direction::Right, 3);
        assert!(snake.occupies(Cell::new(100, 100)));
        assert!(snake.occupies(Cell::new(80, 100)));
        assert!(!snake.occupies(Cell::new(120, 100)));
    }
}

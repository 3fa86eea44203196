//! Held-key tracking and direction buffering

use std::collections::HashSet;

use super::direction::Direction;

/// Tracks which direction keys are currently held and buffers the next
/// intended heading. The buffered heading is committed once per tick; a
/// request opposite to the heading current at press time is dropped, so the
/// snake can never reverse into itself within one tick.
#[derive(Debug, Clone)]
pub struct InputTracker {
    /// Direction keys currently held down
    held: HashSet<Direction>,
    /// Heading to commit on the next tick
    buffered: Direction,
}

impl InputTracker {
    pub fn new(initial: Direction) -> Self {
        Self {
            held: HashSet::new(),
            buffered: initial,
        }
    }

    /// Record a direction key press. `current` is the heading the snake is
    /// actually moving in, not the buffered one.
    pub fn press(&mut self, requested: Direction, current: Direction) {
        self.held.insert(requested);

        if !requested.is_opposite(current) {
            self.buffered = requested;
        }
    }

    /// Record a direction key release
    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    /// Whether any direction key is currently held
    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// The heading to commit on the next tick
    pub fn buffered(&self) -> Direction {
        self.buffered
    }

    /// Drop all held keys and re-seed the buffered heading
    pub fn clear(&mut self, initial: Direction) {
        self.held.clear();
        self.buffered = initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_buffers_heading() {
        let mut input = InputTracker::new(Direction::Right);

        input.press(Direction::Up, Direction::Right);
        assert_eq!(input.buffered(), Direction::Up);
        assert!(input.any_held());
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut input = InputTracker::new(Direction::Right);

        input.press(Direction::Left, Direction::Right);
        // Key is held for boost purposes, but the heading stays put
        assert!(input.any_held());
        assert_eq!(input.buffered(), Direction::Right);
    }

    #[test]
    fn test_reversal_via_two_turns() {
        let mut input = InputTracker::new(Direction::Right);

        // Right -> Up is legal; once the snake actually heads Up,
        // Up -> Left is legal too
        input.press(Direction::Up, Direction::Right);
        assert_eq!(input.buffered(), Direction::Up);
        input.press(Direction::Left, Direction::Up);
        assert_eq!(input.buffered(), Direction::Left);
    }

    #[test]
    fn test_release_clears_held() {
        let mut input = InputTracker::new(Direction::Right);

        input.press(Direction::Up, Direction::Right);
        input.press(Direction::Right, Direction::Right);
        input.release(Direction::Up);
        assert!(input.any_held());
        input.release(Direction::Right);
        assert!(!input.any_held());
    }

    #[test]
    fn test_clear() {
        let mut input = InputTracker::new(Direction::Right);
        input.press(Direction::Down, Direction::Right);

        input.clear(Direction::Right);
        assert!(!input.any_held());
        assert_eq!(input.buffered(), Direction::Right);
    }
}

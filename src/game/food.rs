//! Food placement

use rand::Rng;

use super::cell::Cell;
use super::snake::Snake;
use crate::config::{GRID_SIZE, MAX_FOOD_PLACEMENT_ATTEMPTS, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Pick an unoccupied cell for the next food, uniformly at random.
///
/// Rejection sampling: occupied draws are redrawn. The retry count is capped;
/// past the cap a row-major scan picks the first free cell, so placement
/// stays bounded even when the snake covers most of the board.
pub fn place(snake: &Snake, rng: &mut impl Rng) -> Cell {
    for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
        let cell = Cell::random(rng);
        if !snake.occupies(cell) {
            return cell;
        }
    }

    let mut y = 0;
    while y < PLAYFIELD_HEIGHT {
        let mut x = 0;
        while x < PLAYFIELD_WIDTH {
            let cell = Cell::new(x, y);
            if !snake.occupies(cell) {
                return cell;
            }
            x += GRID_SIZE;
        }
        y += GRID_SIZE;
    }

    // The snake covers every cell of the board. A 30x30 grid cannot reach
    // this before the run ends, so any cell will do for display.
    Cell::new(0, 0)
}

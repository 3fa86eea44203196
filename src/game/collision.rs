//! Collision detection logic

use super::snake::Snake;

/// What the snake collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the playfield
    Wall,
    /// Head overlapped a body segment
    SelfHit,
}

impl CollisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionKind::Wall => "wall",
            CollisionKind::SelfHit => "self_collision",
        }
    }
}

/// Check the snake's head against the playfield bounds and its own body.
/// Runs immediately after movement, before food consumption is evaluated.
pub fn detect(snake: &Snake) -> Option<CollisionKind> {
    if !snake.head().in_bounds() {
        return Some(CollisionKind::Wall);
    }

    if snake.hit_self() {
        return Some(CollisionKind::SelfHit);
    }

    None
}

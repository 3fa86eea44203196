//! Sound cue gating
//!
//! The client plays the actual sounds; the server only pushes cue events.
//! Browsers refuse autoplay before the user has interacted with the page, so
//! cues are suppressed until the first real control input arrives. A dropped
//! cue is never an error.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// A sound the client should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Food consumed
    Eat,
    /// Terminal collision
    GameOver,
}

/// Tracks whether a qualifying user interaction has been seen
#[derive(Debug, Default)]
pub struct AudioGate {
    armed: AtomicBool,
}

impl AudioGate {
    pub fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
        }
    }

    /// Record that the player interacted with the game
    pub fn mark_interaction(&self) {
        self.armed.store(true, Ordering::Relaxed);
    }

    /// Whether cues may be emitted
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Relaxed)
    }
}

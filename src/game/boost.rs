//! Boost controller - cooldown-gated speed bursts

use std::time::{Duration, Instant};

use crate::config::BOOST_COOLDOWN_MS;

/// Schedule change requested by a boost evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostChange {
    /// Boost activated; reschedule at the boost period
    Started,
    /// Boost ended; reschedule at the base period
    Ended,
}

/// Decides each tick whether the scheduler should run at the boosted or the
/// base period. A burst lasts exactly as long as a direction key is held;
/// activations are gated by a cooldown measured from the previous activation.
/// The clock is an explicit input so the decision is testable without timers.
#[derive(Debug, Clone)]
pub struct BoostController {
    boosting: bool,
    last_activation: Option<Instant>,
}

impl BoostController {
    pub fn new() -> Self {
        Self {
            boosting: false,
            last_activation: None,
        }
    }

    /// Whether a burst is currently active
    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    /// Re-evaluate against the current held-key snapshot.
    ///
    /// Not boosting: activate when a direction key is held and the cooldown
    /// has elapsed since the previous activation. Boosting: only a key
    /// release ends the burst; the cooldown is not re-checked.
    pub fn evaluate(&mut self, direction_held: bool, now: Instant) -> Option<BoostChange> {
        if !self.boosting {
            if direction_held && self.cooldown_elapsed(now) {
                self.boosting = true;
                self.last_activation = Some(now);
                return Some(BoostChange::Started);
            }
        } else if !direction_held {
            self.boosting = false;
            return Some(BoostChange::Ended);
        }

        None
    }

    /// End any active burst without touching the cooldown clock
    pub fn deactivate(&mut self) {
        self.boosting = false;
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_activation {
            Some(at) => now.duration_since(at) > Duration::from_millis(BOOST_COOLDOWN_MS),
            None => true,
        }
    }
}

impl Default for BoostController {
    fn default() -> Self {
        Self::new()
    }
}

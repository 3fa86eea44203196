//! Rate limiter for the control surface
//!
//! Control messages are cheap to process but a misbehaving client can still
//! flood the game with them. Each connection gets a fixed-window budget;
//! connections that keep blowing it are dropped.

use std::time::Instant;

use dashmap::DashMap;
use uuid::Uuid;

use crate::config::{MAX_COMMANDS_PER_WINDOW, MAX_RATE_VIOLATIONS, RATE_LIMIT_WINDOW_MS};

/// Per-connection counting state
#[derive(Debug)]
struct ConnectionRateState {
    window_start: Instant,
    commands_in_window: u32,
    violations: u32,
}

impl ConnectionRateState {
    fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            commands_in_window: 0,
            violations: 0,
        }
    }

    /// Count one command against the current window.
    /// Returns (allowed, should_disconnect).
    fn check_command(&mut self, now: Instant) -> (bool, bool) {
        let window_ms = now.duration_since(self.window_start).as_millis() as u64;
        if window_ms >= RATE_LIMIT_WINDOW_MS {
            self.window_start = now;
            self.commands_in_window = 0;
        }

        self.commands_in_window += 1;
        if self.commands_in_window <= MAX_COMMANDS_PER_WINDOW {
            (true, false)
        } else {
            self.violations += 1;
            (false, self.violations >= MAX_RATE_VIOLATIONS)
        }
    }
}

/// Rate limiter over all connections
pub struct RateLimiter {
    connections: DashMap<Uuid, ConnectionRateState>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection
    pub fn add_connection(&self, connection_id: Uuid) {
        self.connections
            .insert(connection_id, ConnectionRateState::new(Instant::now()));
    }

    /// Remove a connection
    pub fn remove_connection(&self, connection_id: &Uuid) {
        self.connections.remove(connection_id);
    }

    /// Count a command from a connection.
    /// Returns (allowed, should_disconnect).
    pub fn check_command(&self, connection_id: &Uuid) -> (bool, bool) {
        match self.connections.get_mut(connection_id) {
            Some(mut state) => state.check_command(Instant::now()),
            // Unknown connection: allow but don't track
            None => (true, false),
        }
    }

    /// Violation count for a connection
    pub fn violations(&self, connection_id: &Uuid) -> u32 {
        self.connections
            .get(connection_id)
            .map(|s| s.violations)
            .unwrap_or(0)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_normal_rate_is_allowed() {
        let mut state = ConnectionRateState::new(Instant::now());

        for _ in 0..MAX_COMMANDS_PER_WINDOW {
            let (allowed, disconnect) = state.check_command(Instant::now());
            assert!(allowed);
            assert!(!disconnect);
        }
    }

    #[test]
    fn test_excess_is_blocked() {
        let t0 = Instant::now();
        let mut state = ConnectionRateState::new(t0);

        for _ in 0..MAX_COMMANDS_PER_WINDOW {
            state.check_command(t0);
        }

        let (allowed, _) = state.check_command(t0);
        assert!(!allowed);
        assert_eq!(state.violations, 1);
    }

    #[test]
    fn test_window_rollover_resets_the_budget() {
        let t0 = Instant::now();
        let mut state = ConnectionRateState::new(t0);

        for _ in 0..=MAX_COMMANDS_PER_WINDOW {
            state.check_command(t0);
        }
        assert_eq!(state.violations, 1);

        // A fresh window allows again; violations are not forgotten
        let t1 = t0 + Duration::from_millis(RATE_LIMIT_WINDOW_MS);
        let (allowed, _) = state.check_command(t1);
        assert!(allowed);
        assert_eq!(state.violations, 1);
    }

    #[test]
    fn test_sustained_abuse_disconnects() {
        let t0 = Instant::now();
        let mut state = ConnectionRateState::new(t0);

        for _ in 0..MAX_COMMANDS_PER_WINDOW {
            state.check_command(t0);
        }

        for i in 1..=MAX_RATE_VIOLATIONS {
            let (allowed, disconnect) = state.check_command(t0);
            assert!(!allowed);
            assert_eq!(disconnect, i >= MAX_RATE_VIOLATIONS);
        }
    }

    #[test]
    fn test_unknown_connection_is_allowed() {
        let limiter = RateLimiter::new();
        let (allowed, disconnect) = limiter.check_command(&Uuid::new_v4());
        assert!(allowed);
        assert!(!disconnect);
    }

    #[test]
    fn test_remove_connection_drops_state() {
        let limiter = RateLimiter::new();
        let id = Uuid::new_v4();

        limiter.add_connection(id);
        limiter.check_command(&id);
        limiter.remove_connection(&id);

        assert_eq!(limiter.violations(&id), 0);
    }
}

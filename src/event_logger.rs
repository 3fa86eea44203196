//! Gameplay event logging for post-hoc analysis

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info};

use crate::config::{ENABLE_EVENT_LOGGING, EVENT_LOG_FILE};

/// Types of game events that can be logged
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A run started from the idle or game-over board
    GameStarted,
    /// A paused run resumed
    GameResumed,
    /// A running game was paused
    GamePaused,
    /// The board was reset to idle
    GameReset,
    /// Terminal collision
    GameOver {
        score: u32,
        length: usize,
        cause: String,
    },
    /// Food consumed
    FoodEaten { x: i32, y: i32, score: u32 },
    /// The high score was exceeded
    HighScore { score: u32 },
    /// Boost burst activated
    BoostStarted,
    /// Boost burst ended
    BoostEnded,
    /// Player moved the speed control
    SpeedChanged { value: u8, period_ms: u64 },
    /// Client connected
    ClientConnected { connection_id: String },
    /// Client disconnected
    ClientDisconnected { connection_id: String },
    /// Rate limit violation
    RateLimitViolation {
        connection_id: String,
        violation_count: u32,
    },
    /// Client dropped for abuse
    ClientKicked {
        connection_id: String,
        reason: String,
    },
}

/// Logged event with timestamp
#[derive(Debug, Serialize)]
struct LogEntry {
    /// Unix timestamp in milliseconds
    timestamp_ms: u128,
    /// The event data
    #[serde(flatten)]
    event: GameEvent,
}

/// Append-only JSON-lines event log
pub struct EventLogger {
    /// File writer (None if logging disabled)
    writer: Option<Mutex<BufWriter<File>>>,
    enabled: bool,
}

impl EventLogger {
    pub fn new() -> Self {
        if !ENABLE_EVENT_LOGGING {
            info!("Event logging is disabled");
            return Self {
                writer: None,
                enabled: false,
            };
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(EVENT_LOG_FILE)
        {
            Ok(file) => {
                info!("Event logging enabled, writing to {}", EVENT_LOG_FILE);
                Self {
                    writer: Some(Mutex::new(BufWriter::new(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to open event log file: {}", e);
                Self {
                    writer: None,
                    enabled: false,
                }
            }
        }
    }

    /// Log a game event
    pub fn log(&self, event: GameEvent) {
        if !self.enabled {
            return;
        }

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let entry = LogEntry {
            timestamp_ms,
            event,
        };

        if let Some(ref writer) = self.writer {
            if let Ok(mut w) = writer.lock() {
                if let Ok(json) = serde_json::to_string(&entry) {
                    let _ = writeln!(w, "{}", json);
                    let _ = w.flush();
                }
            }
        }
    }

    /// Log client connected
    pub fn log_connected(&self, connection_id: &str) {
        self.log(GameEvent::ClientConnected {
            connection_id: connection_id.to_string(),
        });
    }

    /// Log client disconnected
    pub fn log_disconnected(&self, connection_id: &str) {
        self.log(GameEvent::ClientDisconnected {
            connection_id: connection_id.to_string(),
        });
    }

    /// Log rate limit violation
    pub fn log_rate_violation(&self, connection_id: &str, violation_count: u32) {
        self.log(GameEvent::RateLimitViolation {
            connection_id: connection_id.to_string(),
            violation_count,
        });
    }

    /// Log client kicked
    pub fn log_kick(&self, connection_id: &str, reason: &str) {
        self.log(GameEvent::ClientKicked {
            connection_id: connection_id.to_string(),
            reason: reason.to_string(),
        });
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::FoodEaten {
            x: 100,
            y: 200,
            score: 30,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("food_eaten"));
        assert!(json.contains("\"score\":30"));
    }

    #[test]
    fn test_game_over_serialization() {
        let event = GameEvent::GameOver {
            score: 50,
            length: 8,
            cause: "wall".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("game_over"));
        assert!(json.contains("wall"));
    }
}

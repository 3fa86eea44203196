//! Protocol messages for WebSocket communication

use serde::{Deserialize, Deserializer, Serialize};

use crate::audio::Cue;
use crate::game::direction::Direction;
use crate::game::session::RunState;

/// A key on the player's control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Confirm key: starts (or resumes) the game
    Enter,
    /// Toggle key: pauses/resumes while a run is active
    Space,
    /// Any key the game does not react to
    Other,
}

impl Key {
    /// Parse a key name; anything unrecognized maps to `Other`
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "enter" => Key::Enter,
            "space" => Key::Space,
            _ => Key::Other,
        }
    }

    /// The movement direction this key maps to, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Key::from_str(&s))
    }
}

/// Messages sent from client to server
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start a new run, or resume a paused one
    Start,
    /// Toggle pause
    Pause,
    /// Reset to the idle board
    Reset,
    /// Speed control value, 1 (slowest) to 10 (fastest)
    Speed { value: u8 },
    /// A key went down
    KeyDown { key: Key },
    /// A key came up
    KeyUp { key: Key },
    /// Keep-alive
    Ping,
}

impl ClientMessage {
    /// Parse a client message from a JSON string.
    /// Malformed input is ignored, not an error.
    pub fn parse(s: &str) -> Option<Self> {
        serde_json::from_str(s.trim()).ok()
    }
}

/// A grid cell on the wire
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CellData {
    pub x: i32,
    pub y: i32,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Read-only view of the game after a tick or a state transition
    Snapshot {
        snake: Vec<CellData>,
        food: CellData,
        score: u32,
        high_score: u32,
        run_state: RunState,
        is_boosting: bool,
    },
    /// Fire-and-forget sound cue for the client to play
    Cue { sound: Cue },
}

impl ServerMessage {
    /// Serialize message to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_controls() {
        assert!(matches!(
            ClientMessage::parse(r#"{"type":"start"}"#),
            Some(ClientMessage::Start)
        ));
        assert!(matches!(
            ClientMessage::parse(r#"{"type":"speed","value":7}"#),
            Some(ClientMessage::Speed { value: 7 })
        ));
        assert!(matches!(
            ClientMessage::parse(r#"{"type":"key_down","key":"left"}"#),
            Some(ClientMessage::KeyDown { key: Key::Left })
        ));
    }

    #[test]
    fn test_unknown_key_is_tolerated() {
        assert!(matches!(
            ClientMessage::parse(r#"{"type":"key_down","key":"f13"}"#),
            Some(ClientMessage::KeyDown { key: Key::Other })
        ));
    }

    #[test]
    fn test_malformed_input_is_ignored() {
        assert!(ClientMessage::parse("not json").is_none());
        assert!(ClientMessage::parse(r#"{"type":"warp"}"#).is_none());
    }

    #[test]
    fn test_key_direction_mapping() {
        assert_eq!(Key::Up.direction(), Some(Direction::Up));
        assert_eq!(Key::Enter.direction(), None);
        assert_eq!(Key::Other.direction(), None);
    }

    #[test]
    fn test_cue_message_json() {
        let msg = ServerMessage::Cue { sound: Cue::Eat };
        assert_eq!(msg.to_json(), r#"{"type":"cue","sound":"eat"}"#);
    }
}

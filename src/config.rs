//! Game configuration constants

/// Playfield width in pixels
pub const PLAYFIELD_WIDTH: i32 = 600;

/// Playfield height in pixels
pub const PLAYFIELD_HEIGHT: i32 = 600;

/// Grid size (snake segment size) in pixels
pub const GRID_SIZE: i32 = 20;

/// Snake length when a run starts
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded per food eaten
pub const FOOD_SCORE: u32 = 10;

// =============================================================================
// Tick rate / speed control
// =============================================================================

/// Tick period when a run starts, in milliseconds
pub const INITIAL_SPEED_MS: u64 = 200;

/// Fastest tick period the speed control can map to, in milliseconds
pub const MIN_SPEED_MS: u64 = 50;

/// Slowest tick period the speed control can map to, in milliseconds
pub const MAX_SPEED_MS: u64 = 500;

/// Lowest accepted speed-control value (slowest)
pub const SPEED_CONTROL_MIN: u8 = 1;

/// Highest accepted speed-control value (fastest)
pub const SPEED_CONTROL_MAX: u8 = 10;

// =============================================================================
// Boost
// =============================================================================

/// Tick period while boosting, in milliseconds.
/// Faster than any period the speed control can reach (its floor is 95ms).
pub const BOOST_SPEED_MS: u64 = 80;

/// Minimum time between two boost activations, in milliseconds
pub const BOOST_COOLDOWN_MS: u64 = 500;

// =============================================================================
// Food placement
// =============================================================================

/// Random draws before falling back to a deterministic free-cell scan
pub const MAX_FOOD_PLACEMENT_ATTEMPTS: u32 = 128;

// =============================================================================
// Server
// =============================================================================

/// WebSocket server port
pub const SERVER_PORT: u16 = 8080;

/// Broadcast channel capacity
pub const BROADCAST_CAPACITY: usize = 64;

// =============================================================================
// Rate Limiting
// =============================================================================

/// Maximum control commands per window per connection
pub const MAX_COMMANDS_PER_WINDOW: u32 = 25;

/// Time window for rate limiting (in milliseconds)
pub const RATE_LIMIT_WINDOW_MS: u64 = 1000;

/// Number of violations before a connection is dropped
pub const MAX_RATE_VIOLATIONS: u32 = 3;

// =============================================================================
// Persistence / Event Logging
// =============================================================================

/// High score file path
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// Enable game event logging
pub const ENABLE_EVENT_LOGGING: bool = true;

/// Event log file path
pub const EVENT_LOG_FILE: &str = "game_events.log";

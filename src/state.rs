//! Application state shared across all handlers

use std::sync::{Arc, Mutex};

use crate::audio::AudioGate;
use crate::broadcast::{Broadcaster, InMemoryBroadcaster};
use crate::config::HIGH_SCORE_FILE;
use crate::event_logger::EventLogger;
use crate::game::session::{Effects, GameSession, ScheduleCmd};
use crate::highscore::HighScoreStore;
use crate::rate_limiter::RateLimiter;
use crate::scheduler::TickScheduler;

/// The game record and its tick task, guarded by one lock. The tick task and
/// the WebSocket handlers both mutate through here; nothing holds the lock
/// across an await.
#[derive(Debug)]
pub struct Game {
    pub session: GameSession,
    pub scheduler: TickScheduler,
}

impl Game {
    /// Run a session operation and apply its scheduler directive while still
    /// holding the lock, so no other control event can slip between the
    /// state change and the reschedule.
    pub fn apply(
        &mut self,
        state: &Arc<AppState>,
        op: impl FnOnce(&mut GameSession) -> Effects,
    ) -> Effects {
        let fx = op(&mut self.session);

        match fx.schedule {
            Some(ScheduleCmd::Start(period)) => self.scheduler.reschedule(state.clone(), period),
            Some(ScheduleCmd::Stop) => self.scheduler.cancel(),
            None => {}
        }

        fx
    }
}

/// Shared application state
pub struct AppState {
    /// The single game this process runs
    pub game: Mutex<Game>,
    /// Broadcaster for sending messages to all clients
    pub broadcaster: Arc<dyn Broadcaster>,
    /// Gate for sound cues (armed by the first user interaction)
    pub audio: AudioGate,
    /// High score persistence
    pub high_scores: HighScoreStore,
    /// Rate limiter for the control surface
    pub rate_limiter: RateLimiter,
    /// Gameplay event log
    pub event_logger: Arc<EventLogger>,
}

impl AppState {
    /// Create the application state with in-memory broadcasting. Loads the
    /// persisted high score; a missing or unreadable file means zero.
    pub fn new() -> Self {
        Self::with_broadcaster(Arc::new(InMemoryBroadcaster::new()))
    }

    /// Create with a custom broadcaster (for testing)
    pub fn with_broadcaster(broadcaster: Arc<dyn Broadcaster>) -> Self {
        let high_scores = HighScoreStore::new(HIGH_SCORE_FILE);
        let high_score = high_scores.load();

        Self {
            game: Mutex::new(Game {
                session: GameSession::new(high_score),
                scheduler: TickScheduler::new(),
            }),
            broadcaster,
            audio: AudioGate::new(),
            high_scores,
            rate_limiter: RateLimiter::new(),
            event_logger: Arc::new(EventLogger::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

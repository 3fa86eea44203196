//! Game loop glue - feeds ticks and control messages to the session and
//! fans the resulting effects out to the collaborators

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use super::session::Effects;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Process one scheduler tick
pub async fn run_tick(state: &Arc<AppState>) {
    let fx = match state.game.lock() {
        Ok(mut game) => game.apply(state, |session| session.tick(Instant::now())),
        Err(e) => {
            error!("Game state lock poisoned: {}", e);
            return;
        }
    };

    apply_effects(state, fx).await;
}

/// Apply a client control message to the session
pub async fn handle_control(state: &Arc<AppState>, msg: ClientMessage) {
    let fx = match state.game.lock() {
        Ok(mut game) => match msg {
            ClientMessage::Start => game.apply(state, |s| s.start()),
            ClientMessage::Pause => game.apply(state, |s| s.pause()),
            ClientMessage::Reset => game.apply(state, |s| s.reset()),
            ClientMessage::Speed { value } => game.apply(state, |s| s.set_base_speed(value)),
            ClientMessage::KeyDown { key } => game.apply(state, |s| s.key_down(key)),
            ClientMessage::KeyUp { key } => game.apply(state, |s| s.key_up(key)),
            ClientMessage::Ping => return,
        },
        Err(e) => {
            error!("Game state lock poisoned: {}", e);
            return;
        }
    };

    apply_effects(state, fx).await;
}

/// Push the current snapshot to every connected client
pub async fn broadcast_snapshot(state: &Arc<AppState>) {
    let snapshot = match state.game.lock() {
        Ok(game) => game.session.snapshot(),
        Err(e) => {
            error!("Game state lock poisoned: {}", e);
            return;
        }
    };

    state.broadcaster.send(snapshot).await;
}

async fn apply_effects(state: &Arc<AppState>, fx: Effects) {
    for event in fx.events {
        state.event_logger.log(event);
    }

    if let Some(score) = fx.persist_high_score {
        state.high_scores.save(score);
    }

    for cue in fx.cues {
        if state.audio.is_armed() {
            state.broadcaster.send(ServerMessage::Cue { sound: cue }).await;
        } else {
            debug!("Audio gate not armed, dropping {:?} cue", cue);
        }
    }

    if fx.snapshot {
        broadcast_snapshot(state).await;
    }
}

//! WebSocket handler for client connections

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::game::game_loop;
use crate::protocol::ClientMessage;
use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();

    info!("Client {} connected", connection_id);
    state.rate_limiter.add_connection(connection_id);
    state.event_logger.log_connected(&connection_id.to_string());

    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the first snapshot so no update is missed
    let mut broadcast_rx = state.broadcaster.subscribe();

    // Send the current board directly to this client
    let snapshot = match state.game.lock() {
        Ok(game) => game.session.snapshot(),
        Err(e) => {
            error!("Game state lock poisoned: {}", e);
            state.rate_limiter.remove_connection(&connection_id);
            return;
        }
    };
    if sender
        .send(Message::Text(snapshot.to_json().into()))
        .await
        .is_err()
    {
        error!("Failed to send initial snapshot to {}", connection_id);
        state.rate_limiter.remove_connection(&connection_id);
        return;
    }

    // Task to forward broadcast messages to this client
    let send_task = {
        let connection_id = connection_id;

        tokio::spawn(async move {
            loop {
                match broadcast_rx.recv().await {
                    Ok(msg) => {
                        if sender
                            .send(Message::Text(msg.to_json().into()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!("Client {} lagged by {} messages", connection_id, n);
                    }
                    Err(RecvError::Closed) => {
                        break;
                    }
                }
            }
        })
    };

    // Task to receive control messages from this client
    let recv_task = {
        let state = state.clone();

        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let Some(msg) = ClientMessage::parse(&text) else {
                            debug!("Ignoring malformed message from {}", connection_id);
                            continue;
                        };

                        if let ClientMessage::Ping = msg {
                            debug!("Ping from {}", connection_id);
                            continue;
                        }

                        // Any real control input counts as the user
                        // interaction that unlocks sound cues
                        state.audio.mark_interaction();

                        let (allowed, disconnect) = state.rate_limiter.check_command(&connection_id);

                        if disconnect {
                            warn!("Client {} dropped for flooding", connection_id);
                            state
                                .event_logger
                                .log_kick(&connection_id.to_string(), "rate_limit_exceeded");
                            break;
                        }

                        if !allowed {
                            let violations = state.rate_limiter.violations(&connection_id);
                            warn!(
                                "Client {} rate limited (violations: {})",
                                connection_id, violations
                            );
                            state
                                .event_logger
                                .log_rate_violation(&connection_id.to_string(), violations);
                            continue;
                        }

                        debug!("Client {} control: {:?}", connection_id, msg);
                        game_loop::handle_control(&state, msg).await;
                    }
                    Ok(Message::Close(_)) => {
                        info!("Client {} sent close frame", connection_id);
                        break;
                    }
                    Ok(_) => {
                        // Ignore binary, ping, pong frames
                    }
                    Err(e) => {
                        error!("WebSocket error for client {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        })
    };

    // Wait for either direction to finish
    tokio::select! {
        _ = send_task => {}
        _ = recv_task => {}
    }

    info!("Client {} disconnected", connection_id);
    state.event_logger.log_disconnected(&connection_id.to_string());
    state.rate_limiter.remove_connection(&connection_id);
}

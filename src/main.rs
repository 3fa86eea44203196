//! Snake Game Server
//!
//! A single-player snake game: the server owns the game-loop state machine,
//! a browser client renders snapshots and sends controls over WebSocket.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod audio;
mod broadcast;
mod config;
mod event_logger;
mod game;
mod highscore;
mod protocol;
mod rate_limiter;
mod scheduler;
mod state;
mod ws;

use config::{INITIAL_SPEED_MS, SERVER_PORT};
use state::AppState;
use ws::ws_handler;

/// Embedded static files
#[derive(Embed)]
#[folder = "static/"]
struct Assets;

/// Serve embedded static files
async fn serve_static(path: &str) -> impl IntoResponse {
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [("content-type", mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Index page handler
async fn index_handler() -> impl IntoResponse {
    serve_static("index.html").await
}

/// Static file handler
async fn static_handler(
    axum::extract::Path(path): axum::extract::Path<String>,
) -> impl IntoResponse {
    serve_static(&path).await
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_classic=debug,tower_http=debug".into()),
        )
        .init();

    // Create shared state; the tick task starts on the first `start` control
    let state = Arc::new(AppState::new());
    {
        let game = state.game.lock().expect("fresh lock cannot be poisoned");
        info!(
            "Game ready (base tick {}ms, high score {})",
            INITIAL_SPEED_MS,
            game.session.high_score()
        );
    }

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
        .route("/{*path}", get(static_handler))
        .layer(cors)
        .with_state(state);

    // Start the server
    let addr = format!("0.0.0.0:{}", SERVER_PORT);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("🐍 Snake server running on http://{}", addr);
    info!("   WebSocket endpoint: ws://localhost:{}/ws", SERVER_PORT);

    axum::serve(listener, app).await.unwrap();
}

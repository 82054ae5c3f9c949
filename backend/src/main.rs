use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use circle_core::{EngineConfig, Session};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

mod commands;
mod config;

use commands::{format_error, handle_text, snapshot_update};
use config::WorkbenchConfig;

// Application State
struct AppState {
    engine: EngineConfig,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match WorkbenchConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let shared_state = Arc::new(AppState {
        engine: config.engine.clone(),
    });

    // build our application with a route
    let app = Router::new().route("/ws", get(ws_handler));
    let app = match &config.static_dir {
        Some(dir) => {
            info!("serving front end from {}", dir.display());
            app.fallback_service(ServeDir::new(dir))
        }
        None => app.route("/", get(root)),
    };
    let app = app
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    info!("listening on {}", config.listen);
    let listener = match tokio::net::TcpListener::bind(config.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Cannot bind {}: {}", config.listen, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

async fn root() -> &'static str {
    "Circle workbench backend"
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Sleep until the pending recompute is due; never resolves when idle.
async fn recompute_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending::<()>().await,
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("Client connected");

    // Each connection edits its own circle set.
    let mut session = match Session::new(state.engine.clone()) {
        Ok(session) => session,
        Err(e) => {
            warn!("Cannot start session: {}", e);
            return;
        }
    };
    let (mut sender, mut receiver) = socket.split();

    // Send initial (empty) state
    if sender.send(Message::Text(snapshot_update(&session))).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = receiver.next() => {
                let msg = match msg {
                    Some(Ok(msg)) => msg,
                    _ => break,
                };
                match msg {
                    Message::Text(text) => {
                        if let Some(reply) = handle_text(&mut session, &text, Instant::now()) {
                            if sender.send(Message::Text(reply)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    Message::Binary(_) => {
                        let reply = format_error("BAD_COMMAND", "Binary frames are not supported", "warning");
                        if sender.send(Message::Text(reply)).await.is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
            _ = recompute_due(session.next_deadline()) => {
                if session.tick(Instant::now()) {
                    let snapshot = session.snapshot();
                    info!(
                        "Recomputed generation {}: {} chords, {} radical intersections",
                        snapshot.generation,
                        snapshot.registry.len(),
                        snapshot.radical_intersections.len()
                    );
                    if sender.send(Message::Text(snapshot_update(&session))).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    info!("Client disconnected");
}

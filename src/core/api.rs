//! HTTP + WebSocket API for rounds
//!
//! Endpoints:
//! - POST /round/new - Create new round
//! - GET /round/{id} - Current round snapshot
//! - POST /round/{id}/step - Apply one FrameInput
//! - POST /round/{id}/restart - Start the round over
//! - DELETE /round/{id} - Drop a finished or abandoned round
//! - GET /round/{id}/record - Record of the round so far
//! - WS /ws/{id} - Live snapshots, accepts FrameInput messages
//! - GET /health - Health check

use axum::{
    extract::{ws::{Message, WebSocket}, Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::core::round::Round;
use crate::types::{FrameInput, FrameTable, MouthConfig, RoundRecord, RoundSnapshot};

/// Frame count used when a request does not give one
pub const DEFAULT_API_FRAME_COUNT: usize = 6;

/// One live round
#[derive(Debug)]
pub struct RoundSession {
    pub id: String,
    pub round: Round,
    pub update_tx: broadcast::Sender<RoundSnapshot>,
}

impl RoundSession {
    fn step(&mut self, input: &FrameInput) -> RoundSnapshot {
        let snapshot = self.round.step(input);
        let _ = self.update_tx.send(snapshot.clone());
        snapshot
    }
}

/// App state
pub struct AppState {
    pub rounds: RwLock<HashMap<String, RoundSession>>,
    /// Config for rounds created without one
    pub defaults: MouthConfig,
    next_id: AtomicU64,
}

/// Create new round request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewRoundRequest {
    pub config: Option<MouthConfig>,
    pub frame_count: Option<usize>,
}

/// Create new round response
#[derive(Debug, Serialize)]
pub struct NewRoundResponse {
    pub round_id: String,
    pub websocket_url: String,
    pub snapshot: RoundSnapshot,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rounds_active: usize,
}

/// Create the API router
pub fn create_router(defaults: MouthConfig) -> Router {
    let state = Arc::new(AppState {
        rounds: RwLock::new(HashMap::new()),
        defaults,
        next_id: AtomicU64::new(0),
    });

    Router::new()
        .route("/health", get(health))
        .route("/round/new", post(create_round))
        .route("/round/:id", get(get_round).delete(delete_round))
        .route("/round/:id/step", post(step_round))
        .route("/round/:id/restart", post(restart_round))
        .route("/round/:id/record", get(get_record))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let rounds = state.rounds.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        rounds_active: rounds.len(),
    })
}

/// Create new round
async fn create_round(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewRoundRequest>,
) -> Result<Json<NewRoundResponse>, StatusCode> {
    let frames = FrameTable::uniform(req.frame_count.unwrap_or(DEFAULT_API_FRAME_COUNT))
        .map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    let config = req.config.unwrap_or_else(|| state.defaults.clone());
    config.validate().map_err(|reason| {
        warn!(reason = reason.code(), "round config rejected");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;

    let round_id = generate_round_id(&state.next_id);
    let (tx, _) = broadcast::channel(100);
    let round = Round::new(config, Some(frames));
    let snapshot = round.snapshot();

    let mut rounds = state.rounds.write().await;
    rounds.insert(
        round_id.clone(),
        RoundSession {
            id: round_id.clone(),
            round,
            update_tx: tx,
        },
    );
    info!(round_id = %round_id, "round created");

    Ok(Json(NewRoundResponse {
        websocket_url: format!("/ws/{}", round_id),
        round_id,
        snapshot,
    }))
}

/// Current round snapshot
async fn get_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RoundSnapshot>, StatusCode> {
    let rounds = state.rounds.read().await;
    let session = rounds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.round.snapshot()))
}

/// Drop a round; open websockets see it gone on their next input
async fn delete_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut rounds = state.rounds.write().await;
    match rounds.remove(&id) {
        Some(_) => {
            info!(round_id = %id, "round deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Apply one step of input
async fn step_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<FrameInput>,
) -> Result<Json<RoundSnapshot>, StatusCode> {
    let mut rounds = state.rounds.write().await;
    let session = rounds.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(session.step(&input)))
}

/// Start the round over
async fn restart_round(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RoundSnapshot>, StatusCode> {
    let mut rounds = state.rounds.write().await;
    let session = rounds.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let snapshot = session.round.restart();
    let _ = session.update_tx.send(snapshot.clone());
    Ok(Json(snapshot))
}

/// Record of the round so far
async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RoundRecord>, StatusCode> {
    let rounds = state.rounds.read().await;
    let session = rounds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(RoundRecord::from_round(&session.round)))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let rounds = state.rounds.read().await;
    let session = rounds.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(rounds);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, state, id, rx).await;
    }))
}

/// Forward snapshots out, apply incoming FrameInput messages
async fn handle_websocket(
    socket: WebSocket,
    state: Arc<AppState>,
    id: String,
    mut rx: broadcast::Receiver<RoundSnapshot>,
) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Ok(snapshot) = rx.recv().await {
            let json = serde_json::to_string(&snapshot).unwrap_or_default();
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            let text = match message {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };
            let input: FrameInput = match serde_json::from_str(&text) {
                Ok(input) => input,
                Err(e) => {
                    warn!(round_id = %id, error = %e, "bad websocket input");
                    continue;
                }
            };
            let mut rounds = state.rounds.write().await;
            match rounds.get_mut(&id) {
                Some(session) => {
                    session.step(&input);
                }
                None => break,
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    debug!("websocket closed");
}

/// Generate round ID
fn generate_round_id(counter: &AtomicU64) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let n = counter.fetch_add(1, Ordering::Relaxed);
    format!("round_{:x}_{}", nanos as u64, n)
}

/// Run the API server
pub async fn run_server(addr: &str, defaults: MouthConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(defaults);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "ringbite API listening");
    println!("🦷 Ringbite API running on {}", addr);
    println!("  POST /round/new         - Create round");
    println!("  GET  /round/:id         - Get snapshot");
    println!("  DEL  /round/:id         - Delete round");
    println!("  POST /round/:id/step    - Apply FrameInput");
    println!("  POST /round/:id/restart - Restart round");
    println!("  GET  /round/:id/record  - Round record");
    println!("  WS   /ws/:id            - Live snapshots");
    println!("  GET  /health            - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}

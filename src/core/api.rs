//! HTTP + WebSocket API for the discourse engine
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/turn - Run one turn
//! - GET /session/{id}/history - Bounded topic history
//! - DELETE /session/{id} - Drop a session
//! - WS /ws/{id} - Live turn reports
//! - GET /health - Health check

use axum::{
    body::Bytes,
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::core::session::ConversationSession;
use crate::error::EngineError;
use crate::types::{EngineStats, TopicTurn, TurnReport};

/// Reports buffered per session for slow WebSocket readers
const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// One live conversation plus its broadcast channel
#[derive(Debug)]
pub struct SessionEntry {
    pub session: ConversationSession,
    pub updates: broadcast::Sender<TurnReport>,
}

/// App state. Sessions live until deleted; `config.max_sessions` caps the map
pub struct AppState {
    pub sessions: RwLock<HashMap<String, SessionEntry>>,
    pub config: EngineConfig,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    /// Overrides the configured shaper seed for this session
    pub seed: Option<u64>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub current_topic: String,
    pub topic_depth: u32,
    pub history_len: usize,
    pub stats: EngineStats,
}

/// Add turn request
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub text: String,
}

/// History response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub capacity: usize,
    pub turns: Vec<TopicTurn>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(config: EngineConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/turn", post(add_turn))
        .route("/session/:id/history", get(get_history))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session; the body is optional
async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let req: NewSessionRequest = if body.is_empty() {
        NewSessionRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|err| {
            warn!(error = %err, "malformed session request");
            StatusCode::BAD_REQUEST
        })?
    };

    let mut config = state.config.clone();
    if req.seed.is_some() {
        config.seed = req.seed;
    }

    let session_id = Uuid::new_v4().to_string();
    let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
    let entry = SessionEntry {
        session: ConversationSession::new(&config),
        updates: tx,
    };

    let mut sessions = state.sessions.write().await;
    if sessions.len() >= state.config.max_sessions {
        let err = EngineError::SessionLimit(state.config.max_sessions);
        warn!(error = %err, "session rejected");
        return Err(status_for(&err));
    }
    sessions.insert(session_id.clone(), entry);
    info!(session = %session_id, active = sessions.len(), "session created");

    Ok(Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let entry = lookup(&sessions, &id).map_err(|err| status_for(&err))?;
    let conversation = entry.session.state();

    Ok(Json(SessionStatusResponse {
        current_topic: conversation.current_topic.clone(),
        topic_depth: conversation.topic_depth,
        history_len: conversation.topic_history.len(),
        stats: entry.session.stats().clone(),
        session_id: id,
    }))
}

/// Run one turn in a session
async fn add_turn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnReport>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| not_found(&id))
        .map_err(|err| status_for(&err))?;

    let report = entry.session.respond(&req.text).map_err(|err| status_for(&err))?;

    // No subscribers is fine
    let _ = entry.updates.send(report.clone());

    Ok(Json(report))
}

/// Get the bounded topic history, oldest first
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let history = &lookup(&sessions, &id)
        .map_err(|err| status_for(&err))?
        .session
        .state()
        .topic_history;

    Ok(Json(HistoryResponse {
        session_id: id,
        capacity: history.capacity(),
        turns: history.turns().cloned().collect(),
    }))
}

/// Drop a session
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut sessions = state.sessions.write().await;
    match sessions.remove(&id) {
        Some(_) => {
            info!(session = %id, active = sessions.len(), "session deleted");
            StatusCode::NO_CONTENT
        }
        None => status_for(&not_found(&id)),
    }
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let rx = lookup(&sessions, &id)
        .map_err(|err| status_for(&err))?
        .updates
        .subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Forward turn reports until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<TurnReport>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(report) => {
                    let Ok(json) = serde_json::to_string(&report) else { continue };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket reader lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

fn lookup<'a>(
    sessions: &'a HashMap<String, SessionEntry>,
    id: &str,
) -> crate::Result<&'a SessionEntry> {
    sessions.get(id).ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> EngineError {
    warn!(session = %id, "unknown session");
    EngineError::SessionNotFound(id.to_string())
}

/// Map engine errors onto HTTP status codes
pub fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::EmptyUtterance | EngineError::Config(_) => StatusCode::BAD_REQUEST,
        EngineError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::SessionLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Run the API server
pub async fn run_server(addr: &str, config: EngineConfig) -> crate::Result<()> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "discourse API listening");
    info!(
        "routes: POST /session/new, GET|DELETE /session/:id, POST /session/:id/turn, \
         GET /session/:id/history, WS /ws/:id, GET /health"
    );
    axum::serve(listener, router).await?;
    Ok(())
}

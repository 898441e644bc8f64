//! Axum server exposing the delivery and rendering surface.
//!
//! Snapshots arrive by request/response (`POST /api/snapshot`), the
//! suggestion feed pushes unsolicited (`POST /api/suggestion`), and
//! renderers stream live views over WebSocket. The session itself stays
//! single-writer: every delivery takes the write lock, applies one event
//! to completion, then fans the fresh view out to subscribers.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tower_http::cors::CorsLayer;
use trellis_graph::Graph;
use trellis_sync::{EventOutcome, MapId, MapSession, SessionEvent, SessionState};

use crate::view::RenderView;

/// Shared application state.
pub struct AppState {
    session: RwLock<MapSession>,
    updates: broadcast::Sender<RenderView>,
}

/// Mind-map delivery and visualization server for one session.
pub struct MapServer {
    state: Arc<AppState>,
}

impl MapServer {
    /// Create a server owning the given session.
    pub fn new(session: MapSession) -> Self {
        let (updates, _) = broadcast::channel(32);
        Self {
            state: Arc::new(AppState {
                session: RwLock::new(session),
                updates,
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/view", get(view_handler))
            .route("/api/snapshot", post(snapshot_handler))
            .route(
                "/api/suggestion",
                post(suggestion_handler).delete(clear_suggestion_handler),
            )
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("mind-map server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    map_id: MapId,
    state: SessionState,
    node_count: usize,
    edge_count: usize,
}

/// Outcome of a delivery plus the resulting view.
#[derive(Serialize)]
struct DeliveryResponse {
    applied: bool,
    view: RenderView,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn unprocessable(err: trellis_sync::SyncError) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    Json(StatusResponse {
        status: "ok",
        map_id: session.map_id().clone(),
        state: session.state(),
        node_count: session.composite().node_count(),
        edge_count: session.composite().edge_count(),
    })
}

async fn view_handler(State(state): State<Arc<AppState>>) -> Json<RenderView> {
    let session = state.session.read().await;
    Json(RenderView::from_session(&session))
}

/// Delivery payload from the snapshot provider.
#[derive(Deserialize)]
struct SnapshotDelivery {
    map_id: MapId,
    graph: Graph,
}

async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
    Json(delivery): Json<SnapshotDelivery>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    apply_and_broadcast(
        &state,
        SessionEvent::Snapshot {
            map_id: delivery.map_id,
            graph: delivery.graph,
        },
    )
    .await
}

/// Delivery payload from the suggestion push feed.
#[derive(Deserialize)]
struct SuggestionDelivery {
    map_id: MapId,
    graph: Graph,
    summary: String,
}

async fn suggestion_handler(
    State(state): State<Arc<AppState>>,
    Json(delivery): Json<SuggestionDelivery>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    apply_and_broadcast(
        &state,
        SessionEvent::Suggestion {
            map_id: delivery.map_id,
            graph: delivery.graph,
            summary: delivery.summary,
        },
    )
    .await
}

async fn clear_suggestion_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    apply_and_broadcast(&state, SessionEvent::ClearSuggestion).await
}

async fn apply_and_broadcast(
    state: &Arc<AppState>,
    event: SessionEvent,
) -> Result<Json<DeliveryResponse>, ApiError> {
    let mut session = state.session.write().await;
    let outcome = session.apply(event).map_err(unprocessable)?;
    let view = RenderView::from_session(&session);
    drop(session);

    let applied = matches!(
        outcome,
        EventOutcome::BaseReplaced
            | EventOutcome::SuggestionApplied
            | EventOutcome::SuggestionCleared
    );
    if applied {
        // Only topology-changing outcomes are worth waking renderers for.
        let _ = state.updates.send(view.clone());
    }
    Ok(Json(DeliveryResponse { applied, view }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut updates = state.updates.subscribe();

    // Current view first, so a renderer can draw immediately.
    let view = {
        let session = state.session.read().await;
        RenderView::from_session(&session)
    };
    if send_view(&mut socket, &view).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(view) => {
                    if send_view(&mut socket, &view).await.is_err() {
                        break;
                    }
                }
                // Slow consumer: skip to the freshest view next iteration.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Text(text))) => {
                    if let Ok(cmd) = serde_json::from_str::<WsCommand>(&text) {
                        handle_ws_command(&state, &mut socket, cmd).await;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                _ => {}
            },
        }
    }
}

async fn send_view(socket: &mut WebSocket, view: &RenderView) -> Result<(), axum::Error> {
    match serde_json::to_string(view) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(_) => Ok(()),
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetView,
    ClearSuggestion,
}

async fn handle_ws_command(state: &Arc<AppState>, socket: &mut WebSocket, cmd: WsCommand) {
    match cmd {
        WsCommand::GetView => {
            let view = {
                let session = state.session.read().await;
                RenderView::from_session(&session)
            };
            let _ = send_view(socket, &view).await;
        }
        WsCommand::ClearSuggestion => {
            let mut session = state.session.write().await;
            let cleared = session.clear_suggestion();
            let view = RenderView::from_session(&session);
            drop(session);
            if cleared {
                let _ = state.updates.send(view.clone());
            }
            let _ = send_view(socket, &view).await;
        }
    }
}

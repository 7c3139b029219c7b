//! HTTP surface: uploads come in on `POST /post`, viewers attach to `GET /ws`.

use crate::{
    broadcaster::SubscriberHub,
    event::OutgoingEvent,
    ingest::{IngestError, Ingestor},
};
use axum::{
    body::Bytes,
    extract::{
        ws::{Message, WebSocket},
        DefaultBodyLimit, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use anyhow::Context;
use tokio::{
    net::TcpListener,
    sync::broadcast::{self, error::RecvError},
};
use tokio_util::sync::CancellationToken;

/// Shared state handed to every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    ingestor: Ingestor,
    hub: SubscriberHub,
    cancel: CancellationToken,
}

impl AppState {
    pub fn new(ingestor: Ingestor, hub: SubscriberHub, cancel: CancellationToken) -> Self {
        Self {
            ingestor,
            hub,
            cancel,
        }
    }
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/post", post(handle_upload))
        .route("/ws", get(handle_viewer))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Serves `app` until `shutdown` fires and every open request has been answered.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP server failed")
}

async fn handle_upload(State(state): State<AppState>, body: Bytes) -> Response {
    match state.ingestor.ingest(&body) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(IngestError::Decode(e)) => {
            tracing::warn!(bytes = body.len(), "Rejected upload: {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e @ IngestError::Queue(_)) => {
            tracing::warn!("Dropped upload: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}

async fn handle_viewer(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let events = state.hub.subscribe();
    ws.on_upgrade(move |socket| viewer_session(socket, events, state.cancel))
}

async fn viewer_session(
    mut socket: WebSocket,
    mut events: broadcast::Receiver<OutgoingEvent>,
    cancel: CancellationToken,
) {
    tracing::info!("Viewer connected");
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("Failed to serialize {} event: {e}", event.name());
                            continue;
                        }
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Viewer fell behind, skipping events");
                }
                Err(RecvError::Closed) => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            () = cancel.cancelled() => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
        }
    }
    tracing::info!("Viewer disconnected");
}

//! Live check-in notification channel (admin dashboards)
//!
//! Browsers cannot attach headers to WebSocket upgrade requests, so the
//! session token travels as a query parameter and is validated against the
//! session store before the upgrade.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use serde::Deserialize;
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    StreamExt,
};

use crate::{error::AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    pub token: String,
}

/// Upgrade to a WebSocket delivering check-in notifications
#[utoipa::path(
    get,
    path = "/admin/ws",
    tag = "notifications",
    params(("token" = String, Query, description = "Admin session token")),
    responses(
        (status = 101, description = "Switching to WebSocket"),
        (status = 401, description = "Invalid or expired session")
    )
)]
pub async fn check_in_events(
    ws: WebSocketUpgrade,
    Query(query): Query<WsAuthQuery>,
    State(state): State<AppState>,
) -> AppResult<Response> {
    state.services.auth.validate_token(&query.token).await?;

    Ok(ws.on_upgrade(move |socket| forward_events(socket, state)))
}

/// Forward broadcast events to one dashboard until it disconnects
async fn forward_events(mut socket: WebSocket, state: AppState) {
    let receiver = state.services.notifier.subscribe();
    let mut events = BroadcastStream::new(receiver);

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(notification)) => {
                    let payload = match serde_json::to_string(&notification) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::error!("Failed to serialize notification: {}", e);
                            continue;
                        }
                    };
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                    tracing::warn!("Dashboard connection lagged, skipped {} notifications", skipped);
                }
                None => break,
            },
            message = socket.recv() => match message {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // pings and client chatter
                Some(Err(_)) => break,
            },
        }
    }

    tracing::debug!("Dashboard connection closed");
}

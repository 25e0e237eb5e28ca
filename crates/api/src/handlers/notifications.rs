//! Live notification feed for the admin editing surface.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use folio_events::{Notification, NotificationBus};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/admin/notifications
///
/// Upgrades to a WebSocket that receives every notification published from
/// now on as one JSON text frame.
pub async fn ws_handler(
    RequireAdmin(admin): RequireAdmin,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    tracing::debug!(subject = %admin.subject, "Notification feed requested");
    ws.on_upgrade(move |socket| forward_notifications(socket, state.notifications))
}

/// Encode a notification as a WebSocket text frame.
pub fn encode(notification: &Notification) -> Result<Message, serde_json::Error> {
    serde_json::to_string(notification).map(|json| Message::Text(json.into()))
}

/// Pump bus notifications into the socket until either side closes.
async fn forward_notifications(socket: WebSocket, bus: Arc<NotificationBus>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Notification feed connected");

    let mut rx = bus.subscribe();
    drop(bus);
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            received = rx.recv() => match received {
                Ok(notification) => {
                    let frame = match encode(&notification) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to encode notification");
                            continue;
                        }
                    };
                    if sink.send(frame).await.is_err() {
                        tracing::debug!(conn_id = %conn_id, "Notification sink closed");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(conn_id = %conn_id, skipped, "Notification feed lagged");
                }
                Err(RecvError::Closed) => break,
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
        }
    }

    tracing::info!(conn_id = %conn_id, "Notification feed disconnected");
}

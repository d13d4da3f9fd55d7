//! WebSocket feed of notification hub events.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::infra::HubEvent;

/// Upgrade to a WebSocket that streams hub events as `{ "type", "payload" }`.
///
/// The subscription is taken before the upgrade completes, so no event sent
/// after the handshake is missed.
pub async fn events(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    let receiver = state.hub.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, receiver, current_user.id))
}

async fn forward_events(socket: WebSocket, mut events: broadcast::Receiver<HubEvent>, user_id: Uuid) {
    let (mut outgoing, mut incoming) = socket.split();
    tracing::debug!(user_id = %user_id, "Event listener connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!("Could not encode hub event: {}", e);
                            continue;
                        }
                    };
                    if outgoing.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(user_id = %user_id, skipped, "Event listener lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            message = incoming.next() => match message {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!(user_id = %user_id, "Event listener disconnected");
}

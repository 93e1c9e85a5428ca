//! WebSocket upgrade handler for the real-time channel.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use foodbridge_realtime::InboundMessage;

use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
///
/// Connections start anonymous; the client binds a user identity by
/// sending an `identify` message after login.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_connection(state, socket))
}

/// Drives one established WebSocket connection to completion.
async fn handle_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.registry.register();
    let conn_id = handle.id;

    info!(conn_id = %conn_id, "WebSocket connection established");

    // Forward queued events to the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(InboundMessage::Identify { user_id }) => {
                    state.registry.identify(conn_id, user_id);
                }
                Err(e) => {
                    debug!(conn_id = %conn_id, error = %e, "Ignoring unparseable message");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // The disconnect is the sole authority for removing the binding.
    outbound_task.abort();
    state.registry.forget(&conn_id);

    info!(conn_id = %conn_id, "WebSocket connection closed");
}

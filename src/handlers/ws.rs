//! Change-notification WebSocket.
//!
//! Each connected client gets every [`ChangeEvent`] the store publishes, as
//! `{"type":"table_changed","table":"<name>"}`. Events carry no row data:
//! the client is expected to rerun the list query for that table. One
//! subscription exists per socket and ends when the socket closes.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::store::ChangeEvent;
use crate::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

pub(crate) fn event_json(event: &ChangeEvent) -> String {
    serde_json::json!({
        "type": "table_changed",
        "table": event.table,
    })
    .to_string()
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    tracing::debug!("WebSocket connection established");

    let mut rx = state.store.subscribe();

    // Forward change events to this client
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if sender.send(Message::Text(event_json(&event))).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Missed events are harmless: the next one triggers the
                    // same full refetch.
                    tracing::debug!(skipped, "Change subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Drain client frames; we only care about Close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    tracing::debug!(message = %text, "WebSocket message received");
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!("WebSocket connection closed");
}

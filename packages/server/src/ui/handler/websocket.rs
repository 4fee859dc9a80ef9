//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, time::timeout};

use crate::{domain::ConnectionId, ui::state::AppState};

const PUSHER_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Upgrade an HTTP request to a relay connection.
///
/// The connection is registered before the upgrade response is sent, so a
/// client whose handshake completed is already a fan-out target.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    let connection = state.connect_usecase.execute(tx).await;
    let connection_id = connection.id;
    tracing::info!("Connection '{}' registered", connection_id);

    let cleanup_state = state.clone();
    ws.on_failed_upgrade(move |e| {
        tracing::warn!("WebSocket upgrade failed for '{}': {}", connection_id, e);
        tokio::spawn(async move {
            cleanup_state
                .disconnect_usecase
                .execute(connection_id)
                .await;
        });
    })
    .on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound flow: frames relayed from other clients
/// (via rx channel) are written to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }

        // Channel closed by unregister: flush pending frames, including the close reply
        sender.close().await.ok();
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match state_clone
                        .dispatch_event_usecase
                        .execute(&connection_id, text.as_str())
                        .await
                    {
                        Ok(dispatched) => {
                            tracing::trace!(
                                "'{}' from '{}' reached {} connection(s)",
                                dispatched.kind,
                                connection_id,
                                dispatched.fan_out.delivered
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Dropped frame from '{}': {}", connection_id, e);
                        }
                    }
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignored binary frame ({} bytes) from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::trace!("Received ping from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push frames relayed from other clients to this client
    let mut send_task = pusher_loop(rx, sender);

    tokio::select! {
        _ = &mut recv_task => {
            // Unregistering drops the channel sender, so the pusher drains and exits
            state.disconnect_usecase.execute(connection_id).await;
            if timeout(PUSHER_DRAIN_TIMEOUT, &mut send_task).await.is_err() {
                tracing::debug!("Pusher for '{}' did not drain in time", connection_id);
                send_task.abort();
            }
        }
        _ = &mut send_task => {
            recv_task.abort();
            state.disconnect_usecase.execute(connection_id).await;
        }
    };

    tracing::info!(
        "Connection '{}' disconnected ({} remaining)",
        connection_id,
        state.disconnect_usecase.count_remaining_connections().await
    );
}

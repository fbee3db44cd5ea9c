//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::Identity, infrastructure::dto::conversion::decode_inbound, ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Authenticates the credential and upgrades the connection.
///
/// An unknown or missing credential is answered with `401 Unauthorized`
/// before the upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let credential = query.token.unwrap_or_default();

    let identity = match state.authenticator.authenticate(&credential).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Rejected WebSocket upgrade: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    tracing::info!("'{}' authenticated, upgrading connection", identity);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Spawns a task that drains the outbound queue into the WebSocket sink.
///
/// The task ends when a write fails or the queue is closed, which happens when
/// the room evicts this connection.
fn writer_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                return;
            }
        }
        // 送信キューが閉じられた（ルームから追い出された）
        if let Err(e) = sender.send(Message::Close(None)).await {
            tracing::debug!("Failed to send close frame: {}", e);
        }
    })
}

/// Spawns a task that turns inbound text frames into deliveries from `identity`.
fn reader_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    identity: Identity,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", identity, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // 送信者は常にこの接続の認証済み Identity
                    let envelope = match decode_inbound(text.as_str(), &identity) {
                        Ok(envelope) => envelope,
                        Err(e) => {
                            tracing::warn!("Ignoring frame from '{}': {}", identity, e);
                            continue;
                        }
                    };
                    state.send_message_usecase.execute(envelope).await;
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", identity);
                }
                Message::Close(_) => {
                    tracing::info!("'{}' requested close", identity);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Identity) {
    let (outbox, rx) = mpsc::channel(state.outbox_capacity);

    let membership = match state
        .connect_member_usecase
        .execute(identity.clone(), outbox)
        .await
    {
        Ok(membership) => membership,
        Err(e) => {
            tracing::warn!("Failed to connect '{}': {}", identity, e);
            return;
        }
    };
    tracing::info!(
        "Connection '{}' of '{}' joined '{}'",
        membership.connection_id,
        identity,
        membership.room_key
    );

    let (sender, receiver) = socket.split();
    let mut recv_task = reader_loop(receiver, state.clone(), identity.clone());
    let mut send_task = writer_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_member_usecase.execute(&membership).await;
    tracing::info!(
        "Connection '{}' of '{}' disconnected",
        membership.connection_id,
        identity
    );
}

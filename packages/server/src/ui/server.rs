//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::Authenticator,
    usecase::{ConnectMemberUseCase, DisconnectMemberUseCase, ListRoomsUseCase, SendMessageUseCase},
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Default capacity of each connection's outbound queue.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// WebSocket relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_member_usecase,
///     disconnect_member_usecase,
///     send_message_usecase,
///     list_rooms_usecase,
///     authenticator,
/// )
/// .with_outbox_capacity(256);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectMemberUseCase（接続のユースケース）
    connect_member_usecase: Arc<ConnectMemberUseCase>,
    /// DisconnectMemberUseCase（切断のユースケース）
    disconnect_member_usecase: Arc<DisconnectMemberUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// Authenticator（アップグレード時の認証）
    authenticator: Arc<dyn Authenticator>,
    outbox_capacity: usize,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_member_usecase` - UseCase for joining a connection to its room
    /// * `disconnect_member_usecase` - UseCase for leaving the room on disconnect
    /// * `send_message_usecase` - UseCase for routing a message
    /// * `list_rooms_usecase` - UseCase for listing live rooms
    /// * `authenticator` - Resolves the upgrade credential to an identity
    pub fn new(
        connect_member_usecase: Arc<ConnectMemberUseCase>,
        disconnect_member_usecase: Arc<DisconnectMemberUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            connect_member_usecase,
            disconnect_member_usecase,
            send_message_usecase,
            list_rooms_usecase,
            authenticator,
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
        }
    }

    /// Set the capacity of each connection's outbound queue (at least 1).
    pub fn with_outbox_capacity(mut self, capacity: usize) -> Self {
        self.outbox_capacity = capacity.max(1);
        self
    }

    /// Build the router without binding a listener.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_member_usecase: self.connect_member_usecase,
            disconnect_member_usecase: self.disconnect_member_usecase,
            send_message_usecase: self.send_message_usecase,
            list_rooms_usecase: self.list_rooms_usecase,
            authenticator: self.authenticator,
            outbox_capacity: self.outbox_capacity,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?token=<credential>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

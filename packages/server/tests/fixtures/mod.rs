//! Shared fixtures for integration tests.
//!
//! The server runs in-process on an ephemeral port, so tests can run in
//! parallel without fixed port numbers.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use yubin_server::{
    domain::{Authenticator, MailboxDirectory},
    infrastructure::{
        auth::TrustedIdentityAuthenticator,
        mailbox::{OverflowPolicy, RoomRegistry},
    },
    ui::Server,
    usecase::{ConnectMemberUseCase, DisconnectMemberUseCase, ListRoomsUseCase, SendMessageUseCase},
};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// In-process server bound to `127.0.0.1:0`
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server that trusts the credential as the identity
    pub async fn start() -> Self {
        Self::start_with(Arc::new(TrustedIdentityAuthenticator)).await
    }

    /// Start a server with the given authenticator
    pub async fn start_with(authenticator: Arc<dyn Authenticator>) -> Self {
        let registry = Arc::new(RoomRegistry::new(OverflowPolicy::default()));
        Self::start_with_directory(registry, authenticator).await
    }

    /// Start a server routing through `directory`
    pub async fn start_with_directory(
        directory: Arc<dyn MailboxDirectory>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let router = Server::new(
            Arc::new(ConnectMemberUseCase::new(directory.clone())),
            Arc::new(DisconnectMemberUseCase::new(directory.clone())),
            Arc::new(SendMessageUseCase::new(directory.clone())),
            Arc::new(ListRoomsUseCase::new(directory)),
            authenticator,
        )
        .router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        TestServer { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, token: &str) -> String {
        format!("ws://{}/ws?token={}", self.addr, token)
    }

    /// Open a WebSocket for `token` and wait until it has joined its room
    pub async fn connect(&self, token: &str) -> WsStream {
        let before = self.member_count(token).await;
        let (ws, _) = connect_async(self.ws_url(token))
            .await
            .expect("Failed to connect");
        self.wait_for_members(token, before + 1).await;
        ws
    }

    /// Number of live connections of `identity` as reported by `/api/rooms`
    pub async fn member_count(&self, identity: &str) -> usize {
        let rooms: serde_json::Value = reqwest::get(format!("{}/api/rooms", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        rooms
            .as_array()
            .expect("rooms should be an array")
            .iter()
            .find(|room| room["identity"] == identity)
            .map(|room| room["members"].as_array().map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Poll `/api/rooms` until `identity` has exactly `count` connections
    pub async fn wait_for_members(&self, identity: &str, count: usize) {
        let wait = async {
            while self.member_count(identity).await != count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(2), wait)
            .await
            .unwrap_or_else(|_| panic!("'{}' never reached {} connection(s)", identity, count));
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Send a JSON text frame
pub async fn send_json(ws: &mut WsStream, value: serde_json::Value) {
    send_text(ws, &value.to_string()).await;
}

/// Send a raw text frame
pub async fn send_text(ws: &mut WsStream, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Receive the next text frame as JSON (fails after 2 seconds)
pub async fn recv_json(ws: &mut WsStream) -> serde_json::Value {
    let recv = async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).expect("Invalid JSON frame");
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                other => panic!("Expected a text frame, got {:?}", other),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(2), recv)
        .await
        .expect("Timed out waiting for a frame")
}

/// Assert that no frame arrives for a short while
pub async fn assert_silent(ws: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "Expected no frame, got {:?}", result);
}

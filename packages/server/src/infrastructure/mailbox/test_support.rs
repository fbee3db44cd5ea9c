//! Helpers shared by mailbox tests.

use std::{future::Future, time::Duration};

use tokio::sync::mpsc;

use crate::{
    domain::{Envelope, Identity, Member, MessageContent, Timestamp},
    infrastructure::dto::websocket::OutboundMessage,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE: Duration = Duration::from_millis(100);

pub(crate) fn identity(name: &str) -> Identity {
    Identity::new(name.to_string()).unwrap()
}

pub(crate) fn envelope(from: &str, to: &str, content: &str) -> Envelope {
    Envelope::new(
        identity(from),
        identity(to),
        MessageContent::new(content.to_string()).unwrap(),
    )
}

/// A member of `name`'s room with an outbox of `capacity` frames.
pub(crate) fn member(name: &str, capacity: usize) -> (Member, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(capacity);
    (Member::new(identity(name), tx, Timestamp::now()), rx)
}

pub(crate) async fn recv_frame(rx: &mut mpsc::Receiver<String>) -> OutboundMessage {
    let frame = tokio::time::timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for a frame")
        .expect("outbox closed before a frame arrived");
    serde_json::from_str(&frame).expect("frame is not an OutboundMessage")
}

pub(crate) async fn assert_no_frame(rx: &mut mpsc::Receiver<String>) {
    if let Ok(Some(frame)) = tokio::time::timeout(SILENCE, rx.recv()).await {
        panic!("unexpected frame: {}", frame);
    }
}

/// Poll `condition` until it holds or the timeout elapses.
pub(crate) async fn eventually<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition().await
}

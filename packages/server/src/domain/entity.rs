//! Entities of the mailbox model.

use serde::Serialize;
use tokio::sync::mpsc;

use super::{ConnectionId, Identity, MessageContent, RoomInstanceId, RoomKey, Timestamp};

/// Outbound queue of one connection.
///
/// Carries already-encoded frames; bounded so a slow consumer is visible to
/// the room that feeds it.
pub type Outbox = mpsc::Sender<String>;

/// A routed message.
///
/// `from` is always the authenticated identity of the originating connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: Identity,
    pub to: Identity,
    pub content: MessageContent,
}

impl Envelope {
    pub fn new(from: Identity, to: Identity, content: MessageContent) -> Self {
        Self { from, to, content }
    }

    /// Key of the room this envelope is addressed to.
    pub fn destination(&self) -> RoomKey {
        RoomKey::for_identity(&self.to)
    }
}

/// A live connection as seen by its room.
#[derive(Debug)]
pub struct Member {
    pub connection_id: ConnectionId,
    pub identity: Identity,
    pub outbox: Outbox,
    pub connected_at: Timestamp,
}

impl Member {
    pub fn new(identity: Identity, outbox: Outbox, connected_at: Timestamp) -> Self {
        Self {
            connection_id: ConnectionId::generate(),
            identity,
            outbox,
            connected_at,
        }
    }

    /// Key of the room this member belongs to: its own identity's room.
    pub fn room_key(&self) -> RoomKey {
        RoomKey::for_identity(&self.identity)
    }
}

/// Receipt of a completed join.
///
/// Pins the exact room instance the connection joined, so its leave goes to
/// that instance and never to a successor with the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub room_key: RoomKey,
    pub room_instance: RoomInstanceId,
    pub connection_id: ConnectionId,
}

/// Result of routing an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Submitted to the destination room's event loop.
    Queued,
    /// The destination has no live room; the envelope was dropped.
    NoRecipient,
}

/// Point-in-time view of one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSnapshot {
    pub connection_id: ConnectionId,
    pub connected_at: Timestamp,
}

/// Point-in-time view of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub key: RoomKey,
    pub members: Vec<MemberSnapshot>,
}

impl RoomSnapshot {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

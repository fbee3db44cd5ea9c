//! Room actor.
//!
//! A room owns the membership of one identity's mailbox. Its state is only
//! touched from its own task; everything else talks to it through
//! [`RoomEvent`]s on one unbounded, ordered queue.

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{
        ConnectionId, Envelope, Member, MemberSnapshot, RoomError, RoomInstanceId, RoomKey,
        RoomSnapshot,
    },
    infrastructure::dto::websocket::OutboundMessage,
};

use super::{
    policy::{Offer, OverflowPolicy},
    registry::RegistryInner,
};

pub(crate) enum RoomEvent {
    Join(Member),
    Leave(ConnectionId),
    Deliver(Envelope),
    Snapshot(oneshot::Sender<RoomSnapshot>),
}

/// Cheap, cloneable address of a running room.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    key: RoomKey,
    instance: RoomInstanceId,
    events: mpsc::UnboundedSender<RoomEvent>,
}

impl RoomHandle {
    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    pub fn instance(&self) -> RoomInstanceId {
        self.instance
    }

    /// `true` once the room's event loop has stopped accepting events.
    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }

    pub(crate) fn submit(&self, event: RoomEvent) -> Result<(), RoomError> {
        self.events
            .send(event)
            .map_err(|_| RoomError::Closed(self.key.clone()))
    }
}

pub(crate) struct Room {
    key: RoomKey,
    instance: RoomInstanceId,
    members: HashMap<ConnectionId, Member>,
    policy: OverflowPolicy,
    registry: Weak<RegistryInner>,
}

impl Room {
    /// Start the event loop of a new room instance and return its handle.
    ///
    /// Must be called with the registry lock held so the caller can insert the
    /// handle before the room can observe itself as empty.
    pub(crate) fn spawn(
        key: RoomKey,
        policy: OverflowPolicy,
        registry: &Arc<RegistryInner>,
    ) -> RoomHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let instance = RoomInstanceId::generate();

        let room = Room {
            key: key.clone(),
            instance,
            members: HashMap::new(),
            policy,
            registry: Arc::downgrade(registry),
        };
        tokio::spawn(room.run(events_rx));

        RoomHandle {
            key,
            instance,
            events: events_tx,
        }
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<RoomEvent>) {
        tracing::debug!("Room '{}' ({}) event loop started", self.key, self.instance);

        // A room resolved without a join retires as soon as the registry lock is free.
        if !self.try_retire(&mut events).await {
            while let Some(event) = events.recv().await {
                match event {
                    RoomEvent::Join(member) => self.join(member),
                    RoomEvent::Leave(connection_id) => self.leave(connection_id),
                    RoomEvent::Deliver(envelope) => self.deliver(envelope).await,
                    RoomEvent::Snapshot(reply) => {
                        let _ = reply.send(self.snapshot());
                    }
                }

                if self.try_retire(&mut events).await {
                    break;
                }
            }
        }

        if let Some(registry) = self.registry.upgrade() {
            registry.loop_finished();
        }
        tracing::debug!("Room '{}' ({}) event loop stopped", self.key, self.instance);
    }

    /// Retire if there are no members and nothing is queued.
    ///
    /// Returns `true` when the event loop must exit.
    async fn try_retire(&self, events: &mut mpsc::UnboundedReceiver<RoomEvent>) -> bool {
        if !self.members.is_empty() {
            return false;
        }
        let Some(registry) = self.registry.upgrade() else {
            return true;
        };
        if !registry.retire(&self.key, self.instance, events).await {
            return false;
        }
        tracing::info!(
            "Room '{}' ({}) retired: no members left",
            self.key,
            self.instance
        );
        true
    }

    fn join(&mut self, member: Member) {
        tracing::info!(
            "Connection {} of '{}' joined room '{}' ({} member(s))",
            member.connection_id,
            member.identity,
            self.key,
            self.members.len() + 1
        );
        self.members.insert(member.connection_id, member);
    }

    fn leave(&mut self, connection_id: ConnectionId) {
        match self.members.remove(&connection_id) {
            Some(member) => tracing::info!(
                "Connection {} of '{}' left room '{}' ({} member(s))",
                connection_id,
                member.identity,
                self.key,
                self.members.len()
            ),
            None => tracing::debug!(
                "Connection {} already gone from room '{}'",
                connection_id,
                self.key
            ),
        }
    }

    async fn deliver(&mut self, envelope: Envelope) {
        if self.members.is_empty() {
            tracing::debug!(
                "Room '{}' has no members; dropping message from '{}'",
                self.key,
                envelope.from
            );
            return;
        }

        let frame = match serde_json::to_string(&OutboundMessage::from(&envelope)) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to encode message for room '{}': {}", self.key, e);
                return;
            }
        };

        let mut removed = Vec::new();
        for (connection_id, member) in &self.members {
            match self.policy.offer(&member.outbox, frame.clone()).await {
                Offer::Accepted => {}
                Offer::Dropped => tracing::warn!(
                    "Outbox of connection {} is full; dropped message from '{}'",
                    connection_id,
                    envelope.from
                ),
                Offer::Evicted => {
                    tracing::warn!(
                        "Outbox of connection {} is full; evicting it from room '{}'",
                        connection_id,
                        self.key
                    );
                    removed.push(*connection_id);
                }
                Offer::Closed => removed.push(*connection_id),
            }
        }
        for connection_id in removed {
            self.members.remove(&connection_id);
        }

        tracing::debug!(
            "Delivered message from '{}' to {} connection(s) in room '{}'",
            envelope.from,
            self.members.len(),
            self.key
        );
    }

    fn snapshot(&self) -> RoomSnapshot {
        let mut members: Vec<MemberSnapshot> = self
            .members
            .values()
            .map(|member| MemberSnapshot {
                connection_id: member.connection_id,
                connected_at: member.connected_at,
            })
            .collect();
        members.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then(a.connection_id.cmp(&b.connection_id))
        });

        RoomSnapshot {
            key: self.key.clone(),
            members,
        }
    }
}

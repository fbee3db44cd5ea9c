//! Room registry.
//!
//! Process-wide directory from room key to running room. The map is the only
//! state shared across tasks, guarded by a single `tokio::sync::Mutex`.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, oneshot};

use crate::domain::{
    Delivery, Envelope, MailboxDirectory, Member, Membership, RoomError, RoomInstanceId, RoomKey,
    RoomSnapshot,
};

use super::{
    policy::OverflowPolicy,
    room::{Room, RoomEvent, RoomHandle},
};

type Rooms = HashMap<RoomKey, RoomHandle>;

/// Directory of running rooms.
///
/// Cloning is cheap; all clones share the same directory.
///
/// # Example
///
/// ```ignore
/// let registry = RoomRegistry::new(OverflowPolicy::Disconnect);
/// let membership = registry.join(member).await?;
/// registry.deliver(envelope).await;
/// registry.leave(&membership).await;
/// ```
#[derive(Clone)]
pub struct RoomRegistry {
    inner: Arc<RegistryInner>,
}

pub(crate) struct RegistryInner {
    rooms: Mutex<Rooms>,
    policy: OverflowPolicy,
    running_loops: AtomicUsize,
}

impl RoomRegistry {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                rooms: Mutex::new(HashMap::new()),
                policy,
                running_loops: AtomicUsize::new(0),
            }),
        }
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.inner.policy
    }

    /// Return the live room for `key`, starting a new one if there is none.
    ///
    /// Calls serialized on the registry lock observe the same instance while it
    /// is live. A new room that receives no event before the lock is released
    /// retires on its own; `join` resolves and submits under one lock hold.
    pub async fn resolve(&self, key: &RoomKey) -> RoomHandle {
        let mut rooms = self.inner.rooms.lock().await;
        self.resolve_locked(&mut rooms, key)
    }

    /// Return the live room for `key` without creating one.
    pub async fn find(&self, key: &RoomKey) -> Option<RoomHandle> {
        let rooms = self.inner.rooms.lock().await;
        rooms.get(key).filter(|handle| !handle.is_closed()).cloned()
    }

    /// Remove the mapping for `key` only if it still points at `instance`.
    pub async fn remove(&self, key: &RoomKey, instance: RoomInstanceId) -> bool {
        let mut rooms = self.inner.rooms.lock().await;
        remove_locked(&mut rooms, key, instance)
    }

    pub async fn contains(&self, key: &RoomKey) -> bool {
        self.inner.rooms.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.rooms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of room event loops currently running.
    pub fn running_loops(&self) -> usize {
        self.inner.running_loops.load(Ordering::SeqCst)
    }

    fn resolve_locked(&self, rooms: &mut Rooms, key: &RoomKey) -> RoomHandle {
        if let Some(handle) = rooms.get(key)
            && !handle.is_closed()
        {
            return handle.clone();
        }

        self.inner.running_loops.fetch_add(1, Ordering::SeqCst);
        let handle = Room::spawn(key.clone(), self.inner.policy, &self.inner);
        rooms.insert(key.clone(), handle.clone());
        tracing::info!("Room '{}' ({}) created", key, handle.instance());
        handle
    }
}

impl RegistryInner {
    /// Called by an empty room after processing an event.
    ///
    /// Under the registry lock: if nothing else is queued, close the room's
    /// queue and drop its mapping. Returns `true` when the room must exit.
    pub(crate) async fn retire(
        &self,
        key: &RoomKey,
        instance: RoomInstanceId,
        events: &mut mpsc::UnboundedReceiver<RoomEvent>,
    ) -> bool {
        let mut rooms = self.rooms.lock().await;
        if !events.is_empty() {
            return false;
        }
        events.close();
        remove_locked(&mut rooms, key, instance);
        true
    }

    pub(crate) fn loop_finished(&self) {
        self.running_loops.fetch_sub(1, Ordering::SeqCst);
    }
}

fn remove_locked(rooms: &mut Rooms, key: &RoomKey, instance: RoomInstanceId) -> bool {
    if rooms
        .get(key)
        .is_some_and(|handle| handle.instance() == instance)
    {
        rooms.remove(key);
        true
    } else {
        false
    }
}

#[async_trait]
impl MailboxDirectory for RoomRegistry {
    async fn join(&self, member: Member) -> Result<Membership, RoomError> {
        let room_key = member.room_key();
        let connection_id = member.connection_id;

        let mut rooms = self.inner.rooms.lock().await;
        let handle = self.resolve_locked(&mut rooms, &room_key);
        handle.submit(RoomEvent::Join(member))?;

        Ok(Membership {
            room_key,
            room_instance: handle.instance(),
            connection_id,
        })
    }

    async fn leave(&self, membership: &Membership) {
        let rooms = self.inner.rooms.lock().await;
        match rooms.get(&membership.room_key) {
            Some(handle) if handle.instance() == membership.room_instance => {
                if let Err(e) = handle.submit(RoomEvent::Leave(membership.connection_id)) {
                    tracing::debug!(
                        "Leave of connection {} not submitted: {}",
                        membership.connection_id,
                        e
                    );
                }
            }
            _ => tracing::debug!(
                "Room '{}' ({}) already retired; nothing to leave for connection {}",
                membership.room_key,
                membership.room_instance,
                membership.connection_id
            ),
        }
    }

    async fn deliver(&self, envelope: Envelope) -> Delivery {
        let key = envelope.destination();
        let rooms = self.inner.rooms.lock().await;
        match rooms.get(&key) {
            Some(handle) => match handle.submit(RoomEvent::Deliver(envelope)) {
                Ok(()) => Delivery::Queued,
                Err(e) => {
                    tracing::debug!("Dropping message: {}", e);
                    Delivery::NoRecipient
                }
            },
            None => {
                tracing::debug!(
                    "No live room for '{}'; dropping message from '{}'",
                    envelope.to,
                    envelope.from
                );
                Delivery::NoRecipient
            }
        }
    }

    async fn snapshot(&self) -> Vec<RoomSnapshot> {
        let pending: Vec<oneshot::Receiver<RoomSnapshot>> = {
            let rooms = self.inner.rooms.lock().await;
            rooms
                .values()
                .filter_map(|handle| {
                    let (reply_tx, reply_rx) = oneshot::channel();
                    handle.submit(RoomEvent::Snapshot(reply_tx)).ok()?;
                    Some(reply_rx)
                })
                .collect()
        };

        let mut snapshots = Vec::with_capacity(pending.len());
        for reply in pending {
            if let Ok(snapshot) = reply.await {
                snapshots.push(snapshot);
            }
        }
        snapshots.sort_by(|a, b| a.key.cmp(&b.key));
        snapshots
    }
}

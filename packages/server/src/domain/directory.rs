//! Mailbox directory trait.
//!
//! The use case layer routes through this interface; the infrastructure layer
//! provides the actor-based implementation.

use async_trait::async_trait;

use super::{Delivery, Envelope, Member, Membership, RoomError, RoomSnapshot};

/// Directory of rooms, one per identity.
///
/// ## Guarantees
///
/// - One live room per key at a time
/// - Events for one room are processed in submission order
/// - A join never lands in a room that has already retired
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailboxDirectory: Send + Sync {
    /// Join a member to its own identity's room, creating the room if needed.
    async fn join(&self, member: Member) -> Result<Membership, RoomError>;

    /// Leave the exact room instance recorded in `membership`.
    ///
    /// No-op if that instance has already retired.
    async fn leave(&self, membership: &Membership);

    /// Route an envelope to its destination room without creating it.
    async fn deliver(&self, envelope: Envelope) -> Delivery;

    /// Snapshot every live room, sorted by key.
    async fn snapshot(&self) -> Vec<RoomSnapshot>;
}

//! Domain layer for the relay.
//!
//! This module contains the mailbox model and the interfaces the outer layers
//! implement. It knows nothing about WebSocket, JSON or HTTP.

pub mod auth;
pub mod directory;
pub mod entity;
pub mod error;
pub mod value_object;

pub use auth::Authenticator;
pub use directory::MailboxDirectory;
pub use entity::{Delivery, Envelope, Member, MemberSnapshot, Membership, Outbox, RoomSnapshot};
pub use error::{AuthError, RoomError, ValueObjectError};
pub use value_object::{ConnectionId, Identity, MessageContent, RoomInstanceId, RoomKey, Timestamp};

#[cfg(test)]
pub use directory::MockMailboxDirectory;

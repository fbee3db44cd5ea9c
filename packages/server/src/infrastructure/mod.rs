//! Infrastructure layer.
//!
//! - `dto`: wire formats and their conversion to domain types
//! - `mailbox`: room actors and the registry implementing `MailboxDirectory`
//! - `auth`: `Authenticator` implementations

pub mod auth;
pub mod dto;
pub mod mailbox;

//! Value Objects for the mailbox model.
//!
//! Value Objects are immutable and compared by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Authenticated principal bound to a connection.
///
/// Used both as a connection's own address and as a message destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Maximum length in characters.
    pub const MAX_LEN: usize = 100;

    /// Create a new Identity.
    ///
    /// Rejects empty strings, strings longer than [`Identity::MAX_LEN`]
    /// characters, and strings containing whitespace or control characters.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::IdentityEmpty);
        }
        let len = id.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::IdentityTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValueObjectError::IdentityInvalidCharacters(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry key of the room serving one identity.
///
/// Always derived from an [`Identity`], so looking up "my own room" and
/// "someone else's room" goes through the same derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomKey(String);

impl RoomKey {
    pub const PREFIX: &'static str = "user_";

    /// Derive the room key for an identity.
    pub fn for_identity(identity: &Identity) -> Self {
        Self(format!("{}{}", Self::PREFIX, identity.as_str()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identity this room serves.
    pub fn identity(&self) -> Identity {
        Identity(self.0[Self::PREFIX.len()..].to_string())
    }
}

impl From<&Identity> for RoomKey {
    fn from(identity: &Identity) -> Self {
        Self::for_identity(identity)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one live transport session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one room instance.
///
/// A key can be served by several instances over time (an emptied room
/// retires and a later join creates a new one); removal from the registry is
/// keyed by this id so a newer instance is never removed by an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomInstanceId(Uuid);

impl RoomInstanceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RoomInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message body.
///
/// May be empty; bounded by [`MessageContent::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub const MAX_LEN: usize = 10_000;

    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        let len = content.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValueObjectError::MessageContentTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn now() -> Self {
        Self(yubin_shared::time::now_millis())
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

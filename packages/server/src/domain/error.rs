//! Domain layer error definitions.

use thiserror::Error;

use super::RoomKey;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Identity validation error
    #[error("Identity cannot be empty")]
    IdentityEmpty,

    /// Identity too long error
    #[error("Identity cannot exceed {max} characters (got {actual})")]
    IdentityTooLong { max: usize, actual: usize },

    /// Identity contains whitespace or control characters
    #[error("Identity contains invalid characters: {0:?}")]
    IdentityInvalidCharacters(String),

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors related to Room event submission
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The room's event loop has already terminated
    #[error("Room '{0}' is closed")]
    Closed(RoomKey),
}

/// Errors raised while authenticating a connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was supplied
    #[error("credential is required")]
    MissingCredential,

    /// The credential does not map to any identity
    #[error("unknown token")]
    UnknownToken,

    /// The credential resolved to an identity that fails validation
    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] ValueObjectError),
}

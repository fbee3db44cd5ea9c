//! Authentication seam.
//!
//! The relay never verifies credentials itself: a gateway-side
//! [`Authenticator`] turns the credential presented at the WebSocket upgrade
//! into an [`Identity`] before the connection joins its room.

use async_trait::async_trait;

use super::{AuthError, Identity};

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve a credential to the identity it authenticates.
    async fn authenticate(&self, credential: &str) -> Result<Identity, AuthError>;
}

//! Authenticator that trusts the presented identity.

use async_trait::async_trait;

use crate::domain::{AuthError, Authenticator, Identity};

/// Treats the credential as an already-verified identity.
///
/// For development and for deployments where a reverse proxy performs the
/// actual authentication and forwards the principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustedIdentityAuthenticator;

#[async_trait]
impl Authenticator for TrustedIdentityAuthenticator {
    async fn authenticate(&self, credential: &str) -> Result<Identity, AuthError> {
        if credential.is_empty() {
            return Err(AuthError::MissingCredential);
        }
        Ok(Identity::try_from(credential)?)
    }
}

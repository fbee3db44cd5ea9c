//! `Authenticator` implementations.
//!
//! - `trusted`: the credential is the identity (an upstream gateway already
//!   verified it)
//! - `static_token`: fixed token table from configuration

pub mod static_token;
pub mod trusted;

pub use static_token::StaticTokenAuthenticator;
pub use trusted::TrustedIdentityAuthenticator;

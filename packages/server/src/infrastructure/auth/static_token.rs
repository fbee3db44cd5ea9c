//! Authenticator backed by a fixed token table.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{AuthError, Authenticator, Identity, ValueObjectError};

/// Maps opaque tokens to identities.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenAuthenticator {
    pub fn new(tokens: HashMap<String, Identity>) -> Self {
        Self { tokens }
    }

    /// Build from `<token>=<identity>` entries.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first malformed entry.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = HashMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (token, identity) = entry
                .split_once('=')
                .ok_or_else(|| format!("expected <token>=<identity>, got '{}'", entry))?;
            if token.is_empty() {
                return Err(format!("empty token in '{}'", entry));
            }
            let identity = Identity::try_from(identity)
                .map_err(|e: ValueObjectError| format!("invalid identity in '{}': {}", entry, e))?;
            tokens.insert(token.to_string(), identity);
        }
        Ok(Self { tokens })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, credential: &str) -> Result<Identity, AuthError> {
        if credential.is_empty() {
            return Err(AuthError::MissingCredential);
        }
        self.tokens
            .get(credential)
            .cloned()
            .ok_or(AuthError::UnknownToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_resolves_known_token() {
        // テスト項目: 登録済みトークンは対応する Identity に解決される
        // given (前提条件):
        let auth = StaticTokenAuthenticator::from_entries(["s3cret=alice", "hunter2=bob"]).unwrap();

        // when (操作):
        let alice = auth.authenticate("s3cret").await;
        let bob = auth.authenticate("hunter2").await;

        // then (期待する結果):
        assert_eq!(alice.unwrap().as_str(), "alice");
        assert_eq!(bob.unwrap().as_str(), "bob");
        assert_eq!(auth.len(), 2);
    }

    #[tokio::test]
    async fn test_static_token_rejects_unknown_token() {
        // テスト項目: 未登録トークンは UnknownToken になる
        // given (前提条件):
        let auth = StaticTokenAuthenticator::from_entries(["s3cret=alice"]).unwrap();

        // when (操作):
        let result = auth.authenticate("alice").await;

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::UnknownToken));
    }

    #[tokio::test]
    async fn test_static_token_rejects_empty_credential() {
        // テスト項目: 空のクレデンシャルは MissingCredential になる
        // given (前提条件):
        let auth = StaticTokenAuthenticator::default();

        // when (操作):
        let result = auth.authenticate("").await;

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::MissingCredential));
    }

    #[test]
    fn test_from_entries_rejects_malformed_entries() {
        // テスト項目: 不正な形式のエントリは設定エラーになる
        // given (前提条件):
        let cases = ["no-separator", "=alice", "token=", "token=alice bob"];

        // when (操作) / then (期待する結果):
        for case in cases {
            assert!(
                StaticTokenAuthenticator::from_entries([case]).is_err(),
                "entry should be rejected: {}",
                case
            );
        }
    }
}

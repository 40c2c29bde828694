use crate::domain::ports::CredentialProvider;
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;

/// Hands out a fixed bearer token, e.g. one passed on the command line.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Creates a provider that always hands out `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(StorefrontError::CredentialError(
                "user is not signed in".to_string(),
            ));
        }
        Ok(self.token.clone())
    }
}

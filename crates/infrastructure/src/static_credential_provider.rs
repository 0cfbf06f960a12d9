use async_trait::async_trait;
use gamedesk_application::CredentialProvider;
use gamedesk_core::{AppError, AppResult};

/// Credential provider returning a fixed bearer token from configuration.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    token: String,
}

impl StaticCredentialProvider {
    /// Creates a provider for `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("StaticCredentialProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn bearer_token(&self) -> AppResult<String> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized(
                "directory bearer token is not configured".to_owned(),
            ));
        }

        Ok(token.to_owned())
    }
}

use std::time::Duration;

use async_trait::async_trait;

/// One chat-completion call: a system instruction, the user prompt and the
/// generation parameters that travel with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub timeout: Duration,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    Transient(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("rate limited")]
    RateLimited,
    #[error("unexpected response shape: {0}")]
    Protocol(String),
}

impl LlmClientError {
    /// Network, timeout and HTTP-level failures. Protocol errors are the only
    /// class where the response arrived but could not be used.
    pub fn is_transient(&self) -> bool {
        !matches!(self, LlmClientError::Protocol(_))
    }
}

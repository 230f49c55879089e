use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};

use super::RunContext;

/// Generation parameters attached to every request the adapter sends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: usize,
    pub timeout: Duration,
}

/// Bounded exponential backoff: attempt `n` (0-based) waits
/// `base_delay * 2^n` before attempt `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Wraps an [`LlmClient`] with per-call timeouts and sequential retries.
///
/// The adapter never substitutes content: once attempts are exhausted the
/// caller gets [`CompletionError::Exhausted`] and decides what to store.
pub struct CompletionAdapter<L: ?Sized> {
    client: Arc<L>,
    params: GenerationParams,
    policy: RetryPolicy,
}

impl<L> CompletionAdapter<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(client: Arc<L>, params: GenerationParams, policy: RetryPolicy) -> Self {
        Self {
            client,
            params,
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        ctx: &RunContext,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            timeout: self.params.timeout,
        };
        let span = tracing::debug_span!(
            parent: ctx.span(),
            "completion",
            prompt_chars = user_prompt.chars().count()
        );

        self.complete_with_retry(&request).instrument(span).await
    }

    async fn complete_with_retry(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.attempt_once(request).await {
                Ok(text) => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        response_chars = text.chars().count(),
                        "Completion succeeded"
                    );
                    return Ok(text);
                }
                Err(error) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        transient = error.is_transient(),
                        error = %error,
                        "Completion attempt failed"
                    );

                    if attempt + 1 >= max_attempts {
                        return Err(CompletionError::Exhausted {
                            attempts: max_attempts,
                            source: error,
                        });
                    }

                    let wait = self.policy.delay_after(attempt);
                    tracing::info!(wait_secs = wait.as_secs_f64(), "Retrying after backoff");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt_once(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        tokio::time::timeout(request.timeout, self.client.complete(request))
            .await
            .map_err(|_| LlmClientError::Timeout(request.timeout))?
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: LlmClientError,
    },
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use subweave::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use subweave::application::services::{
    CompletionAdapter, CompletionError, GenerationParams, RetryPolicy, RunContext,
};

use crate::helpers::ScriptedLlmClient;

const PARAMS: GenerationParams = GenerationParams {
    temperature: 0.1,
    max_tokens: 3500,
    timeout: Duration::from_secs(40),
};

fn adapter<L: LlmClient + ?Sized>(client: Arc<L>, attempts: u32) -> CompletionAdapter<L> {
    CompletionAdapter::new(client, PARAMS, RetryPolicy::new(attempts, Duration::from_secs(2)))
}

struct SlowClient {
    delay: Duration,
}

#[async_trait::async_trait]
impl LlmClient for SlowClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmClientError> {
        tokio::time::sleep(self.delay).await;
        Ok("too late".to_string())
    }
}

#[tokio::test]
async fn given_healthy_client_when_completing_then_request_carries_generation_params() {
    let client = Arc::new(ScriptedLlmClient::new(|_| Ok("done".to_string())));
    let adapter = adapter(Arc::clone(&client), 3);

    let result = adapter
        .complete("system", "user", &RunContext::new("doc"))
        .await;

    assert_eq!(result, Ok("done".to_string()));
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system_prompt, "system");
    assert_eq!(requests[0].user_prompt, "user");
    assert_eq!(requests[0].temperature, 0.1);
    assert_eq!(requests[0].max_tokens, 3500);
    assert_eq!(requests[0].timeout, Duration::from_secs(40));
}

#[tokio::test(start_paused = true)]
async fn given_persistent_failure_when_completing_then_backoff_doubles_and_error_is_returned() {
    let client = Arc::new(ScriptedLlmClient::failing(LlmClientError::Transient(
        "connection reset".to_string(),
    )));
    let adapter = adapter(Arc::clone(&client), 3);
    let started = tokio::time::Instant::now();

    let result = adapter
        .complete("system", "user", &RunContext::new("doc"))
        .await;

    let waited = started.elapsed();
    assert_eq!(client.call_count(), 3);
    // 2s after the first attempt, 4s after the second, nothing after the last.
    assert!(waited >= Duration::from_secs(6), "waited {waited:?}");
    assert!(waited < Duration::from_secs(7), "waited {waited:?}");
    assert_eq!(
        result,
        Err(CompletionError::Exhausted {
            attempts: 3,
            source: LlmClientError::Transient("connection reset".to_string()),
        })
    );
}

#[tokio::test(start_paused = true)]
async fn given_failure_then_success_when_completing_then_returns_later_result() {
    let calls = AtomicUsize::new(0);
    let client = Arc::new(ScriptedLlmClient::new(move |_| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(LlmClientError::RateLimited)
        } else {
            Ok("second time lucky".to_string())
        }
    }));
    let adapter = adapter(Arc::clone(&client), 3);

    let result = adapter
        .complete("system", "user", &RunContext::new("doc"))
        .await;

    assert_eq!(result, Ok("second time lucky".to_string()));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn given_protocol_error_when_completing_then_it_is_retried_like_transient_errors() {
    let client = Arc::new(ScriptedLlmClient::failing(LlmClientError::Protocol(
        "missing message content".to_string(),
    )));
    let adapter = adapter(Arc::clone(&client), 2);

    let result = adapter
        .complete("system", "user", &RunContext::new("doc"))
        .await;

    assert_eq!(client.call_count(), 2);
    assert!(matches!(
        result,
        Err(CompletionError::Exhausted {
            attempts: 2,
            source: LlmClientError::Protocol(_),
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn given_client_slower_than_timeout_when_completing_then_attempt_times_out() {
    let client = Arc::new(SlowClient {
        delay: Duration::from_secs(120),
    });
    let adapter = adapter(client, 1);

    let result = adapter
        .complete("system", "user", &RunContext::new("doc"))
        .await;

    assert_eq!(
        result,
        Err(CompletionError::Exhausted {
            attempts: 1,
            source: LlmClientError::Timeout(Duration::from_secs(40)),
        })
    );
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::LlmSettings;

/// Chat-completions client for OpenAI-compatible endpoints (DeepSeek, OpenAI,
/// LM Studio, ...).
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self, LlmClientError> {
        // One document is processed strictly sequentially; a single idle
        // connection per host is all the pool ever needs.
        let client = Client::builder()
            .pool_max_idle_per_host(1)
            .build()
            .map_err(|e| LlmClientError::Transient(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmClientError> {
        Self::new(
            &settings.base_url,
            settings.api_key.clone(),
            settings.model.clone(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn classify(error: reqwest::Error, request: &CompletionRequest) -> LlmClientError {
        if error.is_timeout() {
            LlmClientError::Timeout(request.timeout)
        } else {
            LlmClientError::Transient(error.to_string())
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };

        tracing::debug!(
            endpoint = %self.endpoint(),
            model = %self.model,
            prompt = %sanitize_prompt(&request.user_prompt),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::classify(e, request))?;

        let status = response.status();
        tracing::debug!(status = %status, "Received chat completion response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::Transient(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| Self::classify(e, request))?;
        let completion: ChatCompletionResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmClientError::Transient(format!("malformed response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmClientError::Protocol("empty choices".to_string()))?
            .message
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmClientError::Protocol("missing message content".to_string()))?;

        tracing::debug!(
            response = %sanitize_prompt(&content),
            "Completion content received"
        );

        Ok(content)
    }
}

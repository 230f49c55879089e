use std::sync::Mutex;
use std::time::Duration;

use subweave::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use subweave::application::services::PipelineConfig;
use subweave::application::services::prompts::{
    SOURCE_CLOSE, SOURCE_OPEN, WINDOW_CLOSE, WINDOW_OPEN, embedded_text,
};

type Responder = dyn Fn(&CompletionRequest) -> Result<String, LlmClientError> + Send + Sync;

/// Answers every request through `responder` and records what was sent.
pub struct ScriptedLlmClient {
    responder: Box<Responder>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlmClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> Result<String, LlmClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies with the submitted text unchanged.
    pub fn echo() -> Self {
        Self::new(|request| {
            Ok(chunk_input(request)
                .or_else(|| window_input(request))
                .unwrap_or_default()
                .to_string())
        })
    }

    pub fn failing(error: LlmClientError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Texts submitted for chunk processing, in call order.
    pub fn chunk_inputs(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| chunk_input(r).map(str::to_string))
            .collect()
    }

    /// Windows submitted for boundary repair, in call order.
    pub fn window_inputs(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| window_input(r).map(str::to_string))
            .collect()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

pub fn chunk_input(request: &CompletionRequest) -> Option<&str> {
    embedded_text(&request.user_prompt, SOURCE_OPEN, SOURCE_CLOSE)
}

pub fn window_input(request: &CompletionRequest) -> Option<&str> {
    embedded_text(&request.user_prompt, WINDOW_OPEN, WINDOW_CLOSE)
}

/// Defaults with a one-second backoff so paused-clock tests stay readable.
pub fn test_config(chunk_size: usize) -> PipelineConfig {
    let mut config = PipelineConfig {
        chunk_size,
        ..PipelineConfig::default()
    };
    config.retry.base_delay = Duration::from_secs(1);
    config
}

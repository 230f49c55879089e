use std::time::Duration;

use super::completion_adapter::{GenerationParams, RetryPolicy};

pub const DEFAULT_LONG_BRACKET_THRESHOLD: usize = 100;
pub const DEFAULT_TARGET_LANGUAGE: &str = "Simplified Chinese";

/// Everything a [`super::TranscriptPipeline`] needs besides the client itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub chunk_size: usize,
    pub generation: GenerationParams,
    pub retry: RetryPolicy,
    pub enable_retry: bool,
    pub enable_boundary_optimization: bool,
    pub long_bracket_threshold: usize,
    pub target_language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 200,
            generation: GenerationParams {
                temperature: 0.1,
                max_tokens: 3500,
                timeout: Duration::from_secs(40),
            },
            retry: RetryPolicy::new(3, Duration::from_secs(2)),
            enable_retry: true,
            enable_boundary_optimization: true,
            long_bracket_threshold: DEFAULT_LONG_BRACKET_THRESHOLD,
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::InvalidChunkSize(self.chunk_size));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigurationError::InvalidRetryAttempts);
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigurationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

/// Fatal problems detected before any outbound call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("chunk size must be at least one word, got {0}")]
    InvalidChunkSize(usize),
    #[error("retry attempts must be at least 1")]
    InvalidRetryAttempts,
    #[error("max tokens must be greater than zero")]
    InvalidMaxTokens,
    #[error("missing API key: pass --api-key or set DEEPSEEK_API_KEY")]
    MissingApiKey,
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("invalid file pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

use std::fmt;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::application::services::{
    ConfigurationError, DEFAULT_LONG_BRACKET_THRESHOLD, DEFAULT_TARGET_LANGUAGE, GenerationParams,
    PipelineConfig, RetryPolicy,
};
use crate::infrastructure::observability::DEFAULT_FILTER;

use super::Environment;

pub const ENV_PREFIX: &str = "SUBWEAVE";
pub const API_KEY_FALLBACK_VAR: &str = "DEEPSEEK_API_KEY";
const BASE_SETTINGS_FILE: &str = "subweave";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
}

#[derive(Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    pub chunk_size: usize,
    pub retry_attempts: u32,
    pub retry_delay_secs: u64,
    pub enable_retry: bool,
    pub enable_boundary_optimization: bool,
    pub long_bracket_threshold: usize,
    pub target_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "[REDACTED]" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Settings {
    /// Layers built-in defaults, `subweave.toml`, `subweave.<env>.toml` and
    /// `SUBWEAVE__SECTION__KEY` environment variables, in that order.
    pub fn load(environment: Environment) -> Result<Self, ConfigurationError> {
        let settings = defaults()
            .and_then(|builder| {
                builder
                    .add_source(File::with_name(BASE_SETTINGS_FILE).required(false))
                    .add_source(File::with_name(&environment.settings_file()).required(false))
                    .add_source(
                        config::Environment::with_prefix(ENV_PREFIX)
                            .prefix_separator("__")
                            .separator("__")
                            .try_parsing(true),
                    )
                    .build()
            })
            .and_then(|loaded| loaded.try_deserialize::<Settings>())
            .map_err(|e| ConfigurationError::Load(e.to_string()))?;

        Ok(settings.with_api_key_fallback(std::env::var(API_KEY_FALLBACK_VAR).ok()))
    }

    /// Defaults overlaid with a single TOML document. No environment lookup.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigurationError> {
        defaults()
            .and_then(|builder| builder.add_source(File::from_str(toml, FileFormat::Toml)).build())
            .and_then(|loaded| loaded.try_deserialize::<Settings>())
            .map_err(|e| ConfigurationError::Load(e.to_string()))
    }

    pub fn with_api_key_fallback(mut self, fallback: Option<String>) -> Self {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
                self.llm.api_key = key;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }
        self.pipeline_config().validate()
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            chunk_size: self.pipeline.chunk_size,
            generation: GenerationParams {
                temperature: self.llm.temperature,
                max_tokens: self.llm.max_tokens,
                timeout: Duration::from_secs(self.llm.request_timeout_secs),
            },
            retry: RetryPolicy::new(
                self.pipeline.retry_attempts,
                Duration::from_secs(self.pipeline.retry_delay_secs),
            ),
            enable_retry: self.pipeline.enable_retry,
            enable_boundary_optimization: self.pipeline.enable_boundary_optimization,
            long_bracket_threshold: self.pipeline.long_bracket_threshold,
            target_language: self.pipeline.target_language.clone(),
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("llm.api_key", "")?
        .set_default("llm.base_url", "https://api.deepseek.com")?
        .set_default("llm.model", "deepseek-chat")?
        .set_default("llm.temperature", 0.1)?
        .set_default("llm.max_tokens", 3500_i64)?
        .set_default("llm.request_timeout_secs", 40_i64)?
        .set_default("pipeline.chunk_size", 200_i64)?
        .set_default("pipeline.retry_attempts", 3_i64)?
        .set_default("pipeline.retry_delay_secs", 2_i64)?
        .set_default("pipeline.enable_retry", true)?
        .set_default("pipeline.enable_boundary_optimization", true)?
        .set_default(
            "pipeline.long_bracket_threshold",
            DEFAULT_LONG_BRACKET_THRESHOLD as i64,
        )?
        .set_default("pipeline.target_language", DEFAULT_TARGET_LANGUAGE)?
        .set_default("logging.level", DEFAULT_FILTER)?
        .set_default("logging.json", false)
}

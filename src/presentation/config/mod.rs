mod environment;
mod settings;

pub use environment::{Environment, UnknownEnvironment};
pub use settings::{
    API_KEY_FALLBACK_VAR, ENV_PREFIX, LlmSettings, LoggingSettings, PipelineSettings, Settings,
};

use crate::presentation::config::LoggingSettings;

pub const DEFAULT_FILTER: &str = "info,subweave=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()),
            json_format: json_requested_by_env(),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl TracingConfig {
    /// `RUST_LOG` still wins over `default_filter` at init time.
    pub fn from_settings(settings: &LoggingSettings, environment: &str, verbose: bool) -> Self {
        let default_filter = if verbose {
            "debug".to_string()
        } else {
            settings.level.clone()
        };
        Self {
            environment: environment.to_string(),
            json_format: settings.json || json_requested_by_env(),
            default_filter,
        }
    }
}

fn json_requested_by_env() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

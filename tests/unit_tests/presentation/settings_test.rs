use std::time::Duration;

use subweave::application::services::ConfigurationError;
use subweave::infrastructure::observability::DEFAULT_FILTER;
use subweave::presentation::Settings;

#[test]
fn given_empty_document_when_loading_settings_then_defaults_apply() {
    let settings = Settings::from_toml("").unwrap();

    assert_eq!(settings.llm.model, "deepseek-chat");
    assert_eq!(settings.llm.base_url, "https://api.deepseek.com");
    assert_eq!(settings.llm.max_tokens, 3500);
    assert_eq!(settings.llm.request_timeout_secs, 40);
    assert_eq!(settings.pipeline.chunk_size, 200);
    assert_eq!(settings.pipeline.retry_attempts, 3);
    assert_eq!(settings.pipeline.retry_delay_secs, 2);
    assert!(settings.pipeline.enable_retry);
    assert!(settings.pipeline.enable_boundary_optimization);
    assert_eq!(settings.logging.level, DEFAULT_FILTER);
    assert!(!settings.logging.json);
}

#[test]
fn given_toml_overrides_when_loading_settings_then_they_replace_defaults() {
    let settings = Settings::from_toml(
        r#"
        [llm]
        api_key = "from-file"
        model = "gpt-4o-mini"
        temperature = 0.3

        [pipeline]
        chunk_size = 120
        enable_boundary_optimization = false
        target_language = "Japanese"
        "#,
    )
    .unwrap();

    assert_eq!(settings.llm.api_key, "from-file");
    assert_eq!(settings.llm.model, "gpt-4o-mini");
    assert_eq!(settings.pipeline.chunk_size, 120);
    assert!(!settings.pipeline.enable_boundary_optimization);

    let config = settings.pipeline_config();
    assert_eq!(config.chunk_size, 120);
    assert!((config.generation.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.generation.timeout, Duration::from_secs(40));
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.base_delay, Duration::from_secs(2));
    assert_eq!(config.target_language, "Japanese");
}

#[test]
fn given_no_api_key_when_validating_then_returns_missing_api_key() {
    let settings = Settings::from_toml("").unwrap();

    assert_eq!(settings.validate(), Err(ConfigurationError::MissingApiKey));
}

#[test]
fn given_fallback_key_when_file_has_none_then_fallback_is_used() {
    let settings = Settings::from_toml("")
        .unwrap()
        .with_api_key_fallback(Some("env-key".to_string()));

    assert_eq!(settings.llm.api_key, "env-key");
    assert_eq!(settings.validate(), Ok(()));
}

#[test]
fn given_file_key_when_fallback_is_present_then_file_key_wins() {
    let settings = Settings::from_toml("[llm]\napi_key = \"file-key\"")
        .unwrap()
        .with_api_key_fallback(Some("env-key".to_string()));

    assert_eq!(settings.llm.api_key, "file-key");
}

#[test]
fn given_zero_chunk_size_when_validating_then_returns_invalid_chunk_size() {
    let settings = Settings::from_toml("[llm]\napi_key = \"k\"\n[pipeline]\nchunk_size = 0").unwrap();

    assert_eq!(
        settings.validate(),
        Err(ConfigurationError::InvalidChunkSize(0))
    );
}

#[test]
fn given_malformed_toml_when_loading_then_returns_load_error() {
    let result = Settings::from_toml("[llm\napi_key =");

    assert!(matches!(result, Err(ConfigurationError::Load(_))));
}

#[test]
fn given_settings_with_key_when_debug_printed_then_key_is_redacted() {
    let settings = Settings::from_toml("[llm]\napi_key = \"super-secret\"").unwrap();

    let printed = format!("{:?}", settings.llm);

    assert!(!printed.contains("super-secret"));
    assert!(printed.contains("[REDACTED]"));
}

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use subweave::application::ports::LlmClient;
use subweave::application::services::{
    ClientFactory, ConversionOptions, ConversionService, default_output_dir, default_output_path,
};
use subweave::infrastructure::llm::OpenAiClient;
use subweave::infrastructure::observability::{TracingConfig, init_tracing};
use subweave::infrastructure::storage::LocalDocumentStore;
use subweave::infrastructure::text_processing::TextSplitterFactory;
use subweave::presentation::{Cli, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.environment).context("Failed to load settings")?;
    cli.apply_overrides(&mut settings);

    init_tracing(TracingConfig::from_settings(
        &settings.logging,
        cli.environment.as_str(),
        cli.verbose,
    ))
    .context("Failed to initialize tracing")?;
    settings.validate().context("Invalid configuration")?;
    let pattern = cli.file_pattern().context("Invalid configuration")?;

    let config = settings.pipeline_config();
    tracing::info!(
        model = %settings.llm.model,
        base_url = %settings.llm.base_url,
        chunk_size = config.chunk_size,
        retry_attempts = config.retry.max_attempts,
        enable_retry = config.enable_retry,
        enable_boundary_optimization = config.enable_boundary_optimization,
        target_language = %config.target_language,
        "Configuration loaded"
    );

    let llm_settings = settings.llm.clone();
    let client_factory: ClientFactory = Arc::new(move || {
        OpenAiClient::from_settings(&llm_settings).map(|c| Arc::new(c) as Arc<dyn LlmClient>)
    });

    let service = ConversionService::new(
        Arc::new(LocalDocumentStore::new()),
        TextSplitterFactory::create(config.chunk_size),
        client_factory,
        config,
        ConversionOptions {
            frontmatter: cli.frontmatter,
        },
    );

    let metadata = tokio::fs::metadata(&cli.input_path)
        .await
        .with_context(|| format!("Input path not found: {}", cli.input_path.display()))?;

    if metadata.is_dir() {
        let output_dir = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_dir(&cli.input_path));
        let outcomes = service
            .convert_folder(&cli.input_path, &output_dir, pattern.as_str())
            .await
            .context("Batch conversion failed")?;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            anyhow::bail!("{failed} of {} transcripts failed to convert", outcomes.len());
        }
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&cli.input_path));
        let result = service
            .convert_file(&cli.input_path, &output)
            .await
            .with_context(|| format!("Failed to convert {}", cli.input_path.display()))?;

        tracing::info!(
            output = %result.output.display(),
            total_chunks = result.report.total_chunks,
            failed_chunks = result.report.remaining_failures(),
            repaired_seams = result.report.repaired_seams,
            elapsed_secs = result.report.elapsed.as_secs_f64(),
            "Done"
        );
    }

    Ok(())
}

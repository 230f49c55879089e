use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::application::ports::{
    DocumentStore, DocumentStoreError, LlmClient, LlmClientError, TextSplitter,
};
use crate::domain::FailedChunk;

use super::frontmatter::with_frontmatter;
use super::output_naming::clean_filename;
use super::{PipelineConfig, PipelineError, RunContext, RunReport, TranscriptPipeline};

/// Opens a completion client for one document run. The client, and with it the
/// connection pool, is dropped when that run ends.
pub type ClientFactory = Arc<dyn Fn() -> Result<Arc<dyn LlmClient>, LlmClientError> + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    pub frontmatter: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub failed_chunks: Vec<FailedChunk>,
    pub report: RunReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    Succeeded {
        output: PathBuf,
        failed_chunks: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub status: BatchStatus,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, BatchStatus::Succeeded { .. })
    }
}

/// Reads transcripts, runs them through the pipeline and writes the results.
pub struct ConversionService<S> {
    store: Arc<S>,
    splitter: Arc<dyn TextSplitter>,
    client_factory: ClientFactory,
    config: PipelineConfig,
    options: ConversionOptions,
}

impl<S> ConversionService<S>
where
    S: DocumentStore,
{
    pub fn new(
        store: Arc<S>,
        splitter: Arc<dyn TextSplitter>,
        client_factory: ClientFactory,
        config: PipelineConfig,
        options: ConversionOptions,
    ) -> Self {
        Self {
            store,
            splitter,
            client_factory,
            config,
            options,
        }
    }

    pub async fn convert_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<ConversionReport, ConversionError> {
        let ctx = RunContext::new(input.display().to_string());
        self.convert_in_context(input, output, &ctx)
            .instrument(ctx.span().clone())
            .await
    }

    async fn convert_in_context(
        &self,
        input: &Path,
        output: &Path,
        ctx: &RunContext,
    ) -> Result<ConversionReport, ConversionError> {
        tracing::info!(output = %output.display(), "Converting transcript");

        let text = self.store.read_text(input).await?;
        let client = (self.client_factory)()?;
        let pipeline = TranscriptPipeline::new(client, Arc::clone(&self.splitter), self.config.clone());
        let result = pipeline.run(&text, ctx).await?;

        let document = if self.options.frontmatter {
            let title = output
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            with_frontmatter(&title, chrono::Local::now().date_naive(), &result.document)
        } else {
            result.document
        };
        self.store.write_text(output, &document).await?;

        if !result.failed_chunks.is_empty() {
            tracing::warn!(
                failed_chunks = result.failed_chunks.len(),
                "Document written with failure placeholders"
            );
        }
        tracing::info!(output = %output.display(), "Conversion complete");

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            failed_chunks: result.failed_chunks,
            report: result.report,
        })
    }

    /// Converts every matching file in `input_dir` into `output_dir`.
    ///
    /// A file that fails is recorded and the batch moves on.
    pub async fn convert_folder(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        pattern: &str,
    ) -> Result<Vec<BatchOutcome>, ConversionError> {
        let files = self.store.list(input_dir, pattern).await?;
        if files.is_empty() {
            tracing::warn!(dir = %input_dir.display(), pattern, "No matching transcripts found");
            return Ok(Vec::new());
        }

        tracing::info!(files = files.len(), "Starting batch conversion");
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(files.len());

        for (position, input) in files.into_iter().enumerate() {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output = output_dir.join(format!("{}.md", clean_filename(&stem)));
            tracing::info!(file = position + 1, input = %input.display(), "Batch item");

            let status = match self.convert_file(&input, &output).await {
                Ok(report) => BatchStatus::Succeeded {
                    output: report.output,
                    failed_chunks: report.failed_chunks.len(),
                },
                Err(error) => {
                    tracing::error!(input = %input.display(), error = %error, "Conversion failed");
                    BatchStatus::Failed {
                        error: error.to_string(),
                    }
                }
            };
            outcomes.push(BatchOutcome { input, status });
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(
            total = outcomes.len(),
            succeeded,
            failed = outcomes.len() - succeeded,
            elapsed_secs = started.elapsed().as_secs_f64(),
            output_dir = %output_dir.display(),
            "Batch conversion finished"
        );

        Ok(outcomes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("document store: {0}")]
    Store(#[from] DocumentStoreError),
    #[error("completion client: {0}")]
    Client(#[from] LlmClientError),
    #[error("pipeline: {0}")]
    Pipeline(#[from] PipelineError),
}

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::application::ports::{LlmClient, TextSplitter, TextSplitterError};
use crate::domain::FailedChunk;

use super::fragment::{END_OF_DOCUMENT_LABEL, annotate};
use super::{
    BoundaryRepairer, ChunkProcessor, CompletionAdapter, ConfigurationError, ContentCleaner,
    ContentMerger, PipelineConfig, ProcessingOutcome, RunContext,
};

/// Summary of one document's run, for operator visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub total_chunks: usize,
    pub failed_chunks: usize,
    pub recovered_chunks: usize,
    pub seams: usize,
    pub repaired_seams: usize,
    pub trailing_fragment: bool,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn remaining_failures(&self) -> usize {
        self.failed_chunks.saturating_sub(self.recovered_chunks)
    }

    pub fn chunks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_chunks as f64 / secs
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub document: String,
    /// Chunks still holding a failure placeholder.
    pub failed_chunks: Vec<FailedChunk>,
    pub report: RunReport,
}

/// split → sequential processing → optional reprocessing → merge → optional
/// boundary repair → end-of-document fragment.
pub struct TranscriptPipeline<L: ?Sized> {
    splitter: Arc<dyn TextSplitter>,
    processor: ChunkProcessor<L>,
    merger: ContentMerger,
    repairer: BoundaryRepairer<L>,
    config: PipelineConfig,
}

impl<L> TranscriptPipeline<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(client: Arc<L>, splitter: Arc<dyn TextSplitter>, config: PipelineConfig) -> Self {
        let adapter = Arc::new(CompletionAdapter::new(
            client,
            config.generation,
            config.retry,
        ));
        let cleaner = ContentCleaner::new(config.long_bracket_threshold);

        Self {
            splitter,
            processor: ChunkProcessor::new(Arc::clone(&adapter), config.target_language.clone()),
            merger: ContentMerger::new(cleaner),
            repairer: BoundaryRepairer::new(adapter, cleaner, config.target_language.clone()),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Always yields a document once configuration is valid: chunk and seam
    /// failures are recorded, never raised.
    pub async fn run(&self, text: &str, ctx: &RunContext) -> Result<PipelineOutput, PipelineError> {
        self.config.validate()?;

        let span = tracing::info_span!(
            parent: ctx.span(),
            "transcript_pipeline",
            chunk_size = self.config.chunk_size
        );
        self.execute(text, ctx).instrument(span).await
    }

    async fn execute(&self, text: &str, ctx: &RunContext) -> Result<PipelineOutput, PipelineError> {
        let chunks = self.splitter.split(text)?;
        tracing::info!(
            chars = text.chars().count(),
            words = text.split_whitespace().count(),
            chunks = chunks.len(),
            "Split transcript"
        );

        let ProcessingOutcome {
            mut processed,
            failed,
            trailing_fragment,
        } = self.processor.process(&chunks, ctx).await;
        let failed_chunks = failed.len();

        let (recovered_chunks, failed) = if failed.is_empty() {
            (0, failed)
        } else if self.config.enable_retry {
            tracing::info!(failed = failed.len(), "Reprocessing failed chunks");
            let outcome = self
                .processor
                .reprocess_failed(&mut processed, failed, ctx)
                .await;
            (outcome.recovered, outcome.still_failed)
        } else {
            tracing::warn!(
                failed = failed.len(),
                "Chunks failed and reprocessing is disabled"
            );
            (0, failed)
        };

        let merged = self.merger.merge(&processed, ctx);
        let seams = merged.seams.len();

        let (document, repaired_seams) = if self.config.enable_boundary_optimization && seams > 0 {
            let outcome = self.repairer.repair(merged, ctx).await;
            (outcome.text, outcome.repaired)
        } else {
            (merged.text, 0)
        };

        // Appended after repair so no repair window can rewrite or drop it.
        let document = match &trailing_fragment {
            Some(fragment) => annotate(&document, END_OF_DOCUMENT_LABEL, fragment),
            None => document,
        };

        let report = RunReport {
            total_chunks: chunks.len(),
            failed_chunks,
            recovered_chunks,
            seams,
            repaired_seams,
            trailing_fragment: trailing_fragment.is_some(),
            elapsed: ctx.elapsed(),
        };
        tracing::info!(
            total_chunks = report.total_chunks,
            failed_chunks = report.failed_chunks,
            recovered_chunks = report.recovered_chunks,
            seams = report.seams,
            repaired_seams = report.repaired_seams,
            elapsed_secs = report.elapsed.as_secs_f64(),
            chunks_per_second = report.chunks_per_second(),
            "Pipeline finished"
        );

        Ok(PipelineOutput {
            document,
            failed_chunks: failed,
            report,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
}

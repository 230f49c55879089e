mod boundary_repair;
mod chunk_processor;
mod completion_adapter;
mod content_cleaner;
mod content_merger;
mod conversion_service;
pub mod fragment;
mod frontmatter;
mod output_naming;
mod pipeline_config;
pub mod prompts;
mod run_context;
mod transcript_pipeline;

pub use boundary_repair::{
    BoundaryRepairer, PARAGRAPHS_AFTER_SEAM, RepairOutcome, paragraph_spans, repair_window,
};
pub use chunk_processor::{ChunkProcessor, ProcessingOutcome, ProcessingState, ReprocessOutcome};
pub use completion_adapter::{CompletionAdapter, CompletionError, GenerationParams, RetryPolicy};
pub use content_cleaner::ContentCleaner;
pub use content_merger::{ContentMerger, PARAGRAPH_SEPARATOR};
pub use conversion_service::{
    BatchOutcome, BatchStatus, ClientFactory, ConversionError, ConversionOptions,
    ConversionReport, ConversionService,
};
pub use frontmatter::{render_frontmatter, with_frontmatter};
pub use output_naming::{clean_filename, default_output_dir, default_output_path};
pub use pipeline_config::{
    ConfigurationError, DEFAULT_LONG_BRACKET_THRESHOLD, DEFAULT_TARGET_LANGUAGE, PipelineConfig,
};
pub use run_context::RunContext;
pub use transcript_pipeline::{PipelineError, PipelineOutput, RunReport, TranscriptPipeline};

use std::time::{Duration, Instant};

use tracing::Span;

use crate::domain::RunId;

/// Logging context for one document's pass through the pipeline.
///
/// Every component receives the context explicitly and parents its spans on
/// [`RunContext::span`], so log lines from concurrent runs stay separable.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: RunId,
    document: String,
    started: Instant,
    span: Span,
}

impl RunContext {
    pub fn new(document: impl Into<String>) -> Self {
        let run_id = RunId::new();
        let document = document.into();
        let span = tracing::info_span!(
            "pipeline_run",
            run_id = %run_id,
            document = %document,
        );
        Self {
            run_id,
            document,
            started: Instant::now(),
            span,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

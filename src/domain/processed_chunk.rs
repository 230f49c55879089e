use std::fmt;

/// Heading that opens the placeholder substituted for a chunk whose completion failed.
pub const FAILURE_HEADING: &str = "# Processing failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkOutcome {
    Completed,
    Failed,
}

impl ChunkOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkOutcome::Completed => "COMPLETED",
            ChunkOutcome::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ChunkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored output of one chunk step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedChunk {
    pub index: usize,
    pub content: String,
    pub outcome: ChunkOutcome,
}

impl ProcessedChunk {
    pub fn completed(index: usize, content: String) -> Self {
        Self {
            index,
            content,
            outcome: ChunkOutcome::Completed,
        }
    }

    /// Wraps the (possibly fragment-augmented) input verbatim so nothing is lost.
    pub fn failed(index: usize, input: &str) -> Self {
        Self {
            index,
            content: failure_placeholder(input),
            outcome: ChunkOutcome::Failed,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == ChunkOutcome::Failed
    }
}

pub fn failure_placeholder(input: &str) -> String {
    format!("{FAILURE_HEADING}\n\n{input}")
}

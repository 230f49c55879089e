use crate::domain::Chunk;

pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextSplitterError {
    #[error("chunk size must be at least one word, got {0}")]
    InvalidChunkSize(usize),
}

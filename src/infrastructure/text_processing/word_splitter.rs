use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

/// Groups whitespace-delimited words into chunks of exactly `chunk_size`
/// words; only the last chunk may be shorter. Words are rejoined with single
/// spaces, so the transcript's original line breaks do not survive.
pub struct WordSplitter {
    chunk_size: usize,
}

impl WordSplitter {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl TextSplitter for WordSplitter {
    fn split(&self, text: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        if self.chunk_size == 0 {
            return Err(TextSplitterError::InvalidChunkSize(self.chunk_size));
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let chunks: Vec<Chunk> = words
            .chunks(self.chunk_size)
            .enumerate()
            .map(|(index, group)| Chunk::new(index, group.join(" ")))
            .collect();

        tracing::debug!(
            words = words.len(),
            chunk_size = self.chunk_size,
            chunks = chunks.len(),
            "Split text into word chunks"
        );

        Ok(chunks)
    }
}

use crate::domain::{MergedDocument, ProcessedChunk, Seam};

use super::{ContentCleaner, RunContext};

pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Joins processed chunks into one document and remembers where they met.
pub struct ContentMerger {
    cleaner: ContentCleaner,
}

impl ContentMerger {
    pub fn new(cleaner: ContentCleaner) -> Self {
        Self { cleaner }
    }

    /// Cleans every chunk, drops the ones left empty, and joins the rest with
    /// a blank line. A seam is recorded at each join, at the end of the text
    /// built so far and before the separator is pushed.
    ///
    /// Cleanup runs per chunk so that recorded offsets refer to the final text.
    pub fn merge(&self, chunks: &[ProcessedChunk], ctx: &RunContext) -> MergedDocument {
        let _guard = ctx.span().enter();

        let mut text = String::new();
        let mut seams = Vec::new();
        let mut skipped = 0usize;

        for chunk in chunks {
            let cleaned = self.cleaner.clean(&chunk.content);
            if cleaned.is_empty() {
                skipped += 1;
                continue;
            }
            if !text.is_empty() {
                seams.push(Seam::new(text.len()));
                text.push_str(PARAGRAPH_SEPARATOR);
            }
            text.push_str(&cleaned);
        }

        if skipped > 0 {
            tracing::warn!(skipped, total = chunks.len(), "Filtered empty chunk outputs");
        }
        tracing::info!(
            chunks = chunks.len() - skipped,
            seams = seams.len(),
            chars = text.chars().count(),
            "Merged document"
        );

        MergedDocument::new(text, seams)
    }
}

mod chunk;
mod failed_chunk;
mod merged_document;
mod processed_chunk;
mod run_id;

pub use chunk::Chunk;
pub use failed_chunk::FailedChunk;
pub use merged_document::{MergedDocument, Seam};
pub use processed_chunk::{ChunkOutcome, FAILURE_HEADING, ProcessedChunk, failure_placeholder};
pub use run_id::RunId;

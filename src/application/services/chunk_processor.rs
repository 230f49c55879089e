use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::LlmClient;
use crate::domain::{Chunk, FailedChunk, ProcessedChunk};

use super::fragment::{
    FragmentExtraction, UNCARRIED_FRAGMENT_LABEL, annotate, augment, extract_fragment,
};
use super::prompts::{CHUNK_SYSTEM_PROMPT, chunk_prompt};
use super::{CompletionAdapter, RunContext};

/// Accumulator threaded through the sequential pass.
///
/// Exactly one fragment is in flight at a time: `carry` is what step `i`
/// hands to step `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingState {
    pub processed: Vec<ProcessedChunk>,
    pub carry: Option<String>,
    pub failed: Vec<FailedChunk>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOutcome {
    pub processed: Vec<ProcessedChunk>,
    pub failed: Vec<FailedChunk>,
    /// Fragment still in flight after the last chunk. It is not part of any
    /// processed chunk; the pipeline appends it once the document is final.
    pub trailing_fragment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprocessOutcome {
    pub recovered: usize,
    pub still_failed: Vec<FailedChunk>,
}

/// Drives chunks through the completion adapter strictly in index order,
/// carrying an incomplete trailing sentence from each chunk into the next.
pub struct ChunkProcessor<L: ?Sized> {
    adapter: Arc<CompletionAdapter<L>>,
    target_language: String,
}

impl<L> ChunkProcessor<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(adapter: Arc<CompletionAdapter<L>>, target_language: String) -> Self {
        Self {
            adapter,
            target_language,
        }
    }

    pub async fn process(&self, chunks: &[Chunk], ctx: &RunContext) -> ProcessingOutcome {
        let span = tracing::info_span!(
            parent: ctx.span(),
            "chunk_processor",
            chunks = chunks.len()
        );

        async {
            let mut state = ProcessingState::default();
            for chunk in chunks {
                let step_span =
                    tracing::info_span!("chunk", index = chunk.index, total = chunks.len());
                state = self.step(state, chunk, ctx).instrument(step_span).await;
            }
            finish(state)
        }
        .instrument(span)
        .await
    }

    /// One transition `PENDING(i) -> AUGMENTED(i) -> COMPLETED(i) | FAILED(i)`.
    pub async fn step(
        &self,
        mut state: ProcessingState,
        chunk: &Chunk,
        ctx: &RunContext,
    ) -> ProcessingState {
        let carried = state.carry.take();
        let input = augment(carried.as_deref(), &chunk.text);

        match &carried {
            Some(fragment) => tracing::info!(
                fragment_chars = fragment.chars().count(),
                "Prepended fragment carried from previous chunk"
            ),
            None => tracing::debug!("No carried fragment"),
        }
        tracing::info!(
            chars = input.chars().count(),
            words = input.split_whitespace().count(),
            "Processing chunk"
        );

        let prompt = chunk_prompt(&input, &self.target_language);
        match self.adapter.complete(CHUNK_SYSTEM_PROMPT, &prompt, ctx).await {
            Ok(output) => {
                let FragmentExtraction { content, fragment } = extract_fragment(&output);
                match &fragment {
                    Some(fragment) => tracing::info!(
                        fragment_chars = fragment.chars().count(),
                        "Model reported an incomplete trailing sentence"
                    ),
                    None if carried.is_some() => {
                        tracing::info!("Carried fragment resolved")
                    }
                    None => {}
                }
                state
                    .processed
                    .push(ProcessedChunk::completed(chunk.index, content));
                state.carry = fragment;
            }
            Err(error) => {
                tracing::error!(error = %error, "Chunk failed, keeping original text");
                state
                    .processed
                    .push(ProcessedChunk::failed(chunk.index, &input));
                state
                    .failed
                    .push(FailedChunk::new(chunk.index, input, error.to_string()));
                state.carry = None;
            }
        }

        state
    }

    /// Second chance for chunks that exhausted their retries in the main pass.
    ///
    /// Each record's augmented input is resubmitted. A fragment reported by a
    /// reprocessed chunk cannot reach its neighbour any more, so it is kept
    /// inline as an annotation.
    pub async fn reprocess_failed(
        &self,
        processed: &mut [ProcessedChunk],
        failed: Vec<FailedChunk>,
        ctx: &RunContext,
    ) -> ReprocessOutcome {
        let span = tracing::info_span!(
            parent: ctx.span(),
            "reprocess_failed",
            failed = failed.len()
        );

        async {
            let mut recovered = 0;
            let mut still_failed = Vec::new();

            for record in failed {
                let Some(slot) = processed.iter_mut().find(|c| c.index == record.index) else {
                    tracing::warn!(index = record.index, "No processed slot for failed chunk");
                    continue;
                };

                let prompt = chunk_prompt(&record.input, &self.target_language);
                match self.adapter.complete(CHUNK_SYSTEM_PROMPT, &prompt, ctx).await {
                    Ok(output) => {
                        let FragmentExtraction { content, fragment } = extract_fragment(&output);
                        let content = match fragment {
                            Some(fragment) => {
                                annotate(&content, UNCARRIED_FRAGMENT_LABEL, &fragment)
                            }
                            None => content,
                        };
                        *slot = ProcessedChunk::completed(record.index, content);
                        recovered += 1;
                        tracing::info!(index = record.index, "Recovered failed chunk");
                    }
                    Err(error) => {
                        tracing::warn!(index = record.index, error = %error, "Chunk failed again");
                        still_failed.push(FailedChunk::new(
                            record.index,
                            record.input,
                            error.to_string(),
                        ));
                    }
                }
            }

            ReprocessOutcome {
                recovered,
                still_failed,
            }
        }
        .instrument(span)
        .await
    }
}

fn finish(mut state: ProcessingState) -> ProcessingOutcome {
    let trailing_fragment = state.carry.take();

    if let Some(fragment) = &trailing_fragment {
        tracing::warn!(
            fragment_chars = fragment.chars().count(),
            "Incomplete sentence left at end of document"
        );
    }

    ProcessingOutcome {
        processed: state.processed,
        failed: state.failed,
        trailing_fragment,
    }
}

use std::ops::Range;
use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::LlmClient;
use crate::domain::{MergedDocument, Seam};

use super::content_merger::PARAGRAPH_SEPARATOR;
use super::prompts::{BOUNDARY_SYSTEM_PROMPT, boundary_prompt};
use super::{CompletionAdapter, ContentCleaner, RunContext};

/// Paragraphs taken after the seam: one bilingual pair plus the next source
/// paragraph, with the paragraph before the seam closing the pair on the left.
pub const PARAGRAPHS_AFTER_SEAM: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub text: String,
    pub repaired: usize,
    pub failed: usize,
}

/// Asks the model to merge content duplicated on both sides of every seam.
pub struct BoundaryRepairer<L: ?Sized> {
    adapter: Arc<CompletionAdapter<L>>,
    cleaner: ContentCleaner,
    target_language: String,
}

impl<L> BoundaryRepairer<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(
        adapter: Arc<CompletionAdapter<L>>,
        cleaner: ContentCleaner,
        target_language: String,
    ) -> Self {
        Self {
            adapter,
            cleaner,
            target_language,
        }
    }

    /// Seams are handled from the end of the document backwards. A splice only
    /// touches text from the paragraph before its seam onwards, which always
    /// lies after every lower seam, so pending offsets stay valid.
    pub async fn repair(&self, document: MergedDocument, ctx: &RunContext) -> RepairOutcome {
        let MergedDocument { mut text, seams } = document;
        let span = tracing::info_span!(
            parent: ctx.span(),
            "boundary_repair",
            seams = seams.len()
        );

        async {
            let mut ordered = seams;
            ordered.sort_unstable_by(|a, b| b.cmp(a));
            ordered.dedup();

            let mut repaired = 0;
            let mut failed = 0;

            for seam in ordered {
                let Some(window) = repair_window(&text, seam) else {
                    tracing::debug!(seam_offset = seam.offset(), "No paragraphs around seam");
                    continue;
                };

                let replacement = self.request_repair(&text[window.clone()], seam, ctx).await;
                match replacement {
                    Some(replacement) => {
                        text.replace_range(window, &replacement);
                        repaired += 1;
                    }
                    None => failed += 1,
                }
            }

            tracing::info!(repaired, failed, "Boundary repair finished");
            RepairOutcome {
                text,
                repaired,
                failed,
            }
        }
        .instrument(span)
        .await
    }

    async fn request_repair(&self, window: &str, seam: Seam, ctx: &RunContext) -> Option<String> {
        let prompt = boundary_prompt(window, &self.target_language);

        match self.adapter.complete(BOUNDARY_SYSTEM_PROMPT, &prompt, ctx).await {
            Ok(reply) => {
                let cleaned = self.cleaner.clean(&reply);
                if cleaned.is_empty() {
                    tracing::warn!(
                        seam_offset = seam.offset(),
                        "Empty repair reply, keeping window"
                    );
                    return None;
                }
                tracing::debug!(
                    seam_offset = seam.offset(),
                    before_chars = window.chars().count(),
                    after_chars = cleaned.chars().count(),
                    "Repaired seam"
                );
                Some(cleaned)
            }
            Err(error) => {
                tracing::warn!(
                    seam_offset = seam.offset(),
                    error = %error,
                    "Seam repair failed, keeping window"
                );
                None
            }
        }
    }
}

/// Byte ranges of the non-blank paragraphs of `text`, in order.
pub fn paragraph_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (idx, _) in text.match_indices(PARAGRAPH_SEPARATOR) {
        if !text[start..idx].trim().is_empty() {
            spans.push(start..idx);
        }
        start = idx + PARAGRAPH_SEPARATOR.len();
    }
    if start < text.len() && !text[start..].trim().is_empty() {
        spans.push(start..text.len());
    }

    spans
}

/// The paragraph ending nearest before `seam` plus up to
/// [`PARAGRAPHS_AFTER_SEAM`] paragraphs after it, as one byte range.
///
/// `None` when the seam has no paragraph on one of its sides.
pub fn repair_window(text: &str, seam: Seam) -> Option<Range<usize>> {
    let spans = paragraph_spans(text);
    let before = spans.iter().rposition(|span| span.end <= seam.offset())?;
    if before + 1 >= spans.len() {
        return None;
    }
    let last = (before + PARAGRAPHS_AFTER_SEAM).min(spans.len() - 1);

    Some(spans[before].start..spans[last].end)
}

use std::sync::LazyLock;

use regex::Regex;

/// Label of the annotation that keeps a fragment left over after the last chunk.
pub const END_OF_DOCUMENT_LABEL: &str = "Incomplete sentence at end of document";

/// Label used when a reprocessed chunk reports a fragment that can no longer
/// be carried into its (already processed) neighbour.
pub const UNCARRIED_FRAGMENT_LABEL: &str = "Incomplete sentence (untranslated)";

static INCOMPLETE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[INCOMPLETE(?: SENTENCE)?:\s*([^\]]*)\]").expect("valid regex")
});

/// Model output split into the text to keep and the sentence fragment to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentExtraction {
    pub content: String,
    pub fragment: Option<String>,
}

/// Finds the first incomplete-sentence marker, removes every marker, and
/// returns the first marker's payload with whitespace normalised.
pub fn extract_fragment(output: &str) -> FragmentExtraction {
    let Some(captures) = INCOMPLETE_MARKER.captures(output) else {
        return FragmentExtraction {
            content: output.trim().to_string(),
            fragment: None,
        };
    };

    let fragment = captures
        .get(1)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|f| !f.is_empty());
    let content = INCOMPLETE_MARKER.replace_all(output, "").trim().to_string();

    FragmentExtraction { content, fragment }
}

/// Prepends the carried fragment, separated by a single space.
pub fn augment(fragment: Option<&str>, chunk_text: &str) -> String {
    match fragment {
        Some(fragment) if !fragment.is_empty() => format!("{fragment} {chunk_text}"),
        _ => chunk_text.to_string(),
    }
}

/// Appends `fragment` as its own paragraph under a human-readable label.
///
/// The annotation is a blockquote rather than a bracketed marker so that the
/// merger's cleanup keeps it.
pub fn annotate(content: &str, label: &str, fragment: &str) -> String {
    let note = format!("> **{label}:** {fragment}");
    if content.trim().is_empty() {
        note
    } else {
        format!("{}\n\n{note}", content.trim_end())
    }
}

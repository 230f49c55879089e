use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::pipeline_config::DEFAULT_LONG_BRACKET_THRESHOLD;

static STRUCTURAL_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\[(?:INCOMPLETE(?: SENTENCE)?:[^\]]*|INCOMPLETE(?: SENTENCE)?|INCOMPLETE SENTENCE IF ANY|CLEANED (?:SOURCE|ENGLISH) PARAGRAPHS?|(?:MATCHING )?TRANSLATION)\]",
    )
    .expect("valid regex")
});

static BRACKETED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("valid regex"));

static HEADING_WITHOUT_BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n])\n(#{1,6}[ \t])").expect("valid regex"));

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Removes structural markers and noise from model output.
///
/// [`ContentCleaner::clean`] iterates a single cleanup pass until the text stops
/// changing, so `clean(clean(x)) == clean(x)` for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentCleaner {
    long_bracket_threshold: usize,
}

impl Default for ContentCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_BRACKET_THRESHOLD)
    }
}

impl ContentCleaner {
    /// Bracketed spans whose content has at least `long_bracket_threshold`
    /// characters are treated as malformed output and dropped.
    pub fn new(long_bracket_threshold: usize) -> Self {
        Self {
            long_bracket_threshold: long_bracket_threshold.max(1),
        }
    }

    pub fn clean(&self, content: &str) -> String {
        let mut current = content.to_string();
        loop {
            let next = self.clean_once(&current);
            if next == current {
                return next;
            }
            current = next;
        }
    }

    // Terminates: marker and bracket removal strictly reduce the number of
    // '[' characters, heading fixes never re-trigger on the same heading, and
    // newline collapsing and trimming only shorten the text.
    fn clean_once(&self, content: &str) -> String {
        let without_markers = STRUCTURAL_MARKERS.replace_all(content, "");
        let without_noise = self.strip_long_brackets(&without_markers);
        let headings = HEADING_WITHOUT_BLANK_LINE.replace_all(&without_noise, "$1\n\n$2");
        let collapsed = EXCESS_NEWLINES.replace_all(&headings, "\n\n");
        collapsed.trim().to_string()
    }

    fn strip_long_brackets(&self, content: &str) -> String {
        let threshold = self.long_bracket_threshold;
        let mut removed = 0usize;
        let result = BRACKETED_SPAN.replace_all(content, |caps: &Captures| {
            let inner = &caps[1];
            // A span crossing a paragraph break is two paragraphs, not noise.
            if inner.chars().count() >= threshold && !inner.contains("\n\n") {
                removed += 1;
                String::new()
            } else {
                caps[0].to_string()
            }
        });
        if removed > 0 {
            tracing::warn!(count = removed, threshold, "Removed overlong bracketed spans");
        }
        result.into_owned()
    }
}

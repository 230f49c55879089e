use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

const MAX_STEM_CHARS: usize = 50;
const FALLBACK_STEM: &str = "processed_file";

static LECTURE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Lecture\s*(\d+)").expect("valid regex"));
static BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\](){}]").expect("valid regex"));
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Short output stem for a transcript file name.
///
/// `"CS50 Lecture 3 [English]"` becomes `"Lecture3_Notes"`; anything else is
/// reduced to word characters and underscores, capped at 50 characters.
pub fn clean_filename(stem: &str) -> String {
    if let Some(caps) = LECTURE_NUMBER.captures(stem) {
        return format!("Lecture{}_Notes", &caps[1]);
    }

    let cleaned = BRACKETS.replace_all(stem, "");
    let cleaned = NON_WORD.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_RUN.replace_all(cleaned.trim(), "_");
    let cleaned = cleaned.replace("__", "_");
    let cleaned = cleaned.trim_matches('_');

    let truncated: String = cleaned.chars().take(MAX_STEM_CHARS).collect();
    let truncated = truncated.trim_end_matches('_');

    if truncated.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        truncated.to_string()
    }
}

/// `<dir>/<stem>_optimized.md` next to a single input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    input.with_file_name(format!("{stem}_optimized.md"))
}

/// Default batch output folder: `processed` beside the input folder.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir
        .parent()
        .map(|parent| parent.join("processed"))
        .unwrap_or_else(|| PathBuf::from("processed"))
}

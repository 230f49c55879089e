//! Instruction prompts sent to the completion service.
//!
//! The marker literals below are a contract with the model: the chunk prompt
//! asks for `[INCOMPLETE: ...]` and [`super::fragment`] parses exactly that.

pub const CHUNK_SYSTEM_PROMPT: &str = "You are a bilingual document editor. You clean up transcripts and translate them accurately.";

pub const BOUNDARY_SYSTEM_PROMPT: &str = "You are a bilingual document editor. You merge duplicated passages at the seams of a document that was edited in pieces.";

pub const SOURCE_OPEN: &str = "<source>";
pub const SOURCE_CLOSE: &str = "</source>";
pub const WINDOW_OPEN: &str = "<window>";
pub const WINDOW_CLOSE: &str = "</window>";

const CHUNK_TEMPLATE: &str = "Process the subtitle text below exactly as instructed.

==== Requirements ====
1. Correction: fix recognition errors so the text is accurate.
2. Completeness: inspect the END of the text and identify a sentence that was cut off.
3. Paragraphs: reorganise only complete sentences into paragraphs. Return the cut-off sentence untouched.
4. Translation: give an accurate, natural {language} translation of every paragraph.

==== Output format ====
Output exactly the following and nothing else:

<cleaned source paragraphs, without the incomplete sentence>

<matching {language} translation>

[INCOMPLETE: <the incomplete trailing text, verbatim>]

Omit the INCOMPLETE line when the text ends with a complete sentence.

==== Forbidden ====
- Do not add explanations or describe your steps.
- Do not translate the incomplete sentence.
- Do not complete a truncated sentence yourself.
- Do not add titles, numbering or other formatting.

Source text:
{open}
{text}
{close}

Output the result directly:";

const BOUNDARY_TEMPLATE: &str = "The passage below was produced by editing and translating a long transcript in separate pieces. Where two pieces meet, the same content is often expressed twice: a sentence appears at the end of one piece and again, reworded or partially repeated, at the start of the next, and the {language} translations repeat the same way.

==== Requirements ====
1. Merge content that appears on both sides of the cut so each idea is stated once.
2. Keep the layout: source paragraphs followed by their {language} translation, paragraphs separated by blank lines.
3. Do not drop information that appears only once.
4. Do not add explanations, titles or markers.

Passage:
{open}
{text}
{close}

Output the merged passage directly:";

pub fn chunk_prompt(text: &str, target_language: &str) -> String {
    render(CHUNK_TEMPLATE, text, target_language, SOURCE_OPEN, SOURCE_CLOSE)
}

pub fn boundary_prompt(window: &str, target_language: &str) -> String {
    render(BOUNDARY_TEMPLATE, window, target_language, WINDOW_OPEN, WINDOW_CLOSE)
}

fn render(template: &str, text: &str, language: &str, open: &str, close: &str) -> String {
    // `{text}` goes last so braces inside the transcript are never expanded.
    template
        .replace("{language}", language)
        .replace("{open}", open)
        .replace("{close}", close)
        .replace("{text}", text)
}

/// Text enclosed between `open` and `close` in a rendered prompt.
pub fn embedded_text<'a>(prompt: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = prompt.find(open)? + open.len();
    let end = prompt.rfind(close)?;
    prompt.get(start..end).map(|s| s.trim_matches('\n'))
}

use subweave::application::ports::{TextSplitter, TextSplitterError};
use subweave::infrastructure::text_processing::{TextSplitterFactory, WordSplitter};

const EXAMPLE: &str = "The cat sat on the mat and it was very comfortable for";

#[test]
fn given_example_sentence_when_splitting_by_eight_words_then_creates_two_chunks() {
    let splitter = WordSplitter::new(8);

    let chunks = splitter.split(EXAMPLE).unwrap();

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["The cat sat on the mat and it", "was very comfortable for"]
    );
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[1].index, 1);
}

#[test]
fn given_irregular_whitespace_when_splitting_then_rejoined_chunks_equal_normalised_words() {
    let text = "  alpha\tbeta\n\ngamma   delta epsilon\r\nzeta eta ";
    let splitter = WordSplitter::new(3);

    let chunks = splitter.split(text).unwrap();

    let rejoined = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let normalised = text.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(rejoined, normalised);
    assert!(chunks[..chunks.len() - 1].iter().all(|c| c.word_count() == 3));
    assert_eq!(chunks.last().unwrap().word_count(), 1);
}

#[test]
fn given_empty_text_when_splitting_then_returns_no_chunks() {
    let splitter = WordSplitter::new(200);

    assert!(splitter.split("").unwrap().is_empty());
    assert!(splitter.split(" \n\t ").unwrap().is_empty());
}

#[test]
fn given_zero_chunk_size_when_splitting_then_returns_invalid_chunk_size() {
    let splitter = WordSplitter::new(0);

    assert_eq!(
        splitter.split(EXAMPLE),
        Err(TextSplitterError::InvalidChunkSize(0))
    );
}

#[test]
fn given_chunk_size_when_factory_creates_splitter_then_it_uses_that_size() {
    let splitter = TextSplitterFactory::create(5);

    let chunks = splitter.split(EXAMPLE).unwrap();

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text, "The cat sat on the");
}

use subweave::application::ports::{DocumentStore, DocumentStoreError};
use subweave::infrastructure::storage::LocalDocumentStore;

fn create_test_store() -> (tempfile::TempDir, LocalDocumentStore) {
    let dir = tempfile::TempDir::new().unwrap();
    (dir, LocalDocumentStore::new())
}

#[tokio::test]
async fn given_written_document_when_reading_then_text_matches() {
    let (dir, store) = create_test_store();
    let path = dir.path().join("nested").join("deeper").join("out.md");

    store.write_text(&path, "你好，世界").await.unwrap();
    let text = store.read_text(&path).await.unwrap();

    assert_eq!(text, "你好，世界");
}

#[tokio::test]
async fn given_missing_file_when_reading_then_returns_not_found() {
    let (dir, store) = create_test_store();
    let path = dir.path().join("missing.txt");

    let result = store.read_text(&path).await;

    assert!(matches!(result, Err(DocumentStoreError::NotFound(p)) if p == path));
}

#[tokio::test]
async fn given_invalid_utf8_when_reading_then_decodes_lossily() {
    let (dir, store) = create_test_store();
    let path = dir.path().join("broken.txt");
    std::fs::write(&path, b"caf\xe9 time").unwrap();

    let text = store.read_text(&path).await.unwrap();

    assert_eq!(text, "caf\u{fffd} time");
}

#[tokio::test]
async fn given_byte_order_mark_when_reading_then_it_is_stripped() {
    let (dir, store) = create_test_store();
    let path = dir.path().join("bom.txt");
    std::fs::write(&path, "\u{feff}hello").unwrap();

    let text = store.read_text(&path).await.unwrap();

    assert_eq!(text, "hello");
}

#[tokio::test]
async fn given_folder_when_listing_with_suffix_pattern_then_returns_sorted_matching_files() {
    let (dir, store) = create_test_store();
    for name in ["b.txt", "a.txt", "c.srt", "notes.md"] {
        std::fs::write(dir.path().join(name), "x").unwrap();
    }
    std::fs::create_dir(dir.path().join("folder.txt")).unwrap();

    let files = store.list(dir.path(), "*.txt").await.unwrap();

    assert_eq!(
        files,
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
}

#[tokio::test]
async fn given_file_path_when_listing_then_returns_not_a_directory() {
    let (dir, store) = create_test_store();
    let path = dir.path().join("single.txt");
    std::fs::write(&path, "x").unwrap();

    let result = store.list(&path, "*.txt").await;

    assert!(matches!(result, Err(DocumentStoreError::NotADirectory(_))));
}

#[tokio::test]
async fn given_gbk_encoded_file_when_reading_then_decodes_chinese_text() {
    let (dir, store) = create_test_store();
    let path = dir.path().join("gbk.txt");
    std::fs::write(&path, [0xD6, 0xD0, 0xCE, 0xC4]).unwrap();

    let text = store.read_text(&path).await.unwrap();

    assert_eq!(text, "中文");
}

#[tokio::test]
async fn given_glob_patterns_when_listing_then_wildcards_match_anywhere_in_the_name() {
    let (dir, store) = create_test_store();
    for name in ["Lecture 3.txt", "Lecture 10.txt", "intro.txt", "a.tst", "b.md"] {
        std::fs::write(dir.path().join(name), "x").unwrap();
    }

    let lectures = store.list(dir.path(), "Lecture*.txt").await.unwrap();
    let single_char = store.list(dir.path(), "*.t?t").await.unwrap();

    assert_eq!(
        lectures,
        vec![
            dir.path().join("Lecture 10.txt"),
            dir.path().join("Lecture 3.txt"),
        ]
    );
    assert_eq!(
        single_char,
        vec![
            dir.path().join("Lecture 10.txt"),
            dir.path().join("Lecture 3.txt"),
            dir.path().join("a.tst"),
            dir.path().join("intro.txt"),
        ]
    );
}

#[tokio::test]
async fn given_malformed_glob_when_listing_then_returns_invalid_pattern() {
    let (dir, store) = create_test_store();

    let result = store.list(dir.path(), "[unclosed").await;

    assert!(matches!(
        result,
        Err(DocumentStoreError::InvalidPattern { pattern, .. }) if pattern == "[unclosed"
    ));
}

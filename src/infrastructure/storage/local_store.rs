use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::application::ports::{DocumentStore, DocumentStoreError};

const UTF8_BOM: char = '\u{feff}';

/// Documents on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDocumentStore;

impl LocalDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn read_text(&self, path: &Path) -> Result<String, DocumentStoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocumentStoreError::NotFound(path.to_path_buf()),
            _ => DocumentStoreError::Io(e),
        })?;

        let text = decode_transcript(bytes, path);
        let text = if text.starts_with(UTF8_BOM) {
            text[UTF8_BOM.len_utf8()..].to_string()
        } else {
            text
        };
        tracing::info!(
            path = %path.display(),
            chars = text.chars().count(),
            "Read transcript"
        );
        Ok(text)
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), DocumentStoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote document");
        Ok(())
    }

    async fn list(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DocumentStoreError> {
        let pattern =
            Pattern::new(pattern).map_err(|e| DocumentStoreError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        let metadata = tokio::fs::metadata(dir).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocumentStoreError::NotFound(dir.to_path_buf()),
            _ => DocumentStoreError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(DocumentStoreError::NotADirectory(dir.to_path_buf()));
        }

        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if entry.file_type().await?.is_file() && pattern.matches(&name.to_string_lossy()) {
                files.push(entry.path());
            }
        }
        files.sort();

        Ok(files)
    }
}

/// UTF-8 first, then GBK (which also covers GB2312 text). Bytes that fit
/// neither are decoded lossily.
fn decode_transcript(bytes: Vec<u8>, path: &Path) -> String {
    let bytes = match String::from_utf8(bytes) {
        Ok(text) => return text,
        Err(e) => e.into_bytes(),
    };

    let (decoded, _, had_errors) = encoding_rs::GBK.decode(&bytes);
    if !had_errors {
        tracing::info!(path = %path.display(), "Transcript decoded as GBK");
        return decoded.into_owned();
    }

    tracing::warn!(
        path = %path.display(),
        "Transcript is neither UTF-8 nor GBK, decoding lossily"
    );
    String::from_utf8_lossy(&bytes).into_owned()
}

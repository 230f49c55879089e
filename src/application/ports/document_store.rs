use std::io;
use std::path::{Path, PathBuf};

/// Where transcripts are read from and converted documents are written to.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn read_text(&self, path: &Path) -> Result<String, DocumentStoreError>;

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), DocumentStoreError>;

    /// Files directly inside `dir` whose name matches the glob `pattern`,
    /// sorted by path.
    async fn list(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DocumentStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("not found: {0}")]
    NotFound(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("invalid file pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

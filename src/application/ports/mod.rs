mod document_store;
mod llm_client;
mod text_splitter;

pub use document_store::{DocumentStore, DocumentStoreError};
pub use llm_client::{CompletionRequest, LlmClient, LlmClientError};
pub use text_splitter::{TextSplitter, TextSplitterError};

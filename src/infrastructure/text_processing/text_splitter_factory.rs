use std::sync::Arc;

use crate::application::ports::TextSplitter;

use super::WordSplitter;

pub struct TextSplitterFactory;

impl TextSplitterFactory {
    pub fn create(chunk_size: usize) -> Arc<dyn TextSplitter> {
        Arc::new(WordSplitter::new(chunk_size))
    }
}

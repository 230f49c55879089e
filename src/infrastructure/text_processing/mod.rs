mod text_splitter_factory;
mod word_splitter;

pub use text_splitter_factory::TextSplitterFactory;
pub use word_splitter::WordSplitter;

/// A word-bounded slice of the source transcript sized for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

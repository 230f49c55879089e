/// Byte offset in a merged document where two processed chunks were joined.
///
/// The offset points at the end of the preceding paragraph, i.e. the start of
/// the blank-line separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seam(usize);

impl Seam {
    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    pub fn offset(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedDocument {
    pub text: String,
    pub seams: Vec<Seam>,
}

impl MergedDocument {
    pub fn new(text: String, seams: Vec<Seam>) -> Self {
        Self { text, seams }
    }

    pub fn empty() -> Self {
        Self {
            text: String::new(),
            seams: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

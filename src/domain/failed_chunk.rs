/// Diagnostic record for a chunk that exhausted its retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedChunk {
    pub index: usize,
    pub input: String,
    pub error: String,
}

impl FailedChunk {
    pub fn new(index: usize, input: String, error: String) -> Self {
        Self {
            index,
            input,
            error,
        }
    }
}

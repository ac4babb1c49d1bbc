use wordcount_core::contract::{TopWordEntry, WordCountRecord};

use super::AdapterError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchWriteOutcome {
    pub written: usize,
    pub unprocessed: usize,
}

pub trait WordCountTable {
    /// Puts every record, overwriting rows with the same key. Items the
    /// table could not accept are reported in `unprocessed`, not as an error.
    fn batch_put(&self, records: &[WordCountRecord]) -> Result<BatchWriteOutcome, AdapterError>;
}

pub trait WordCountIndex {
    /// Highest-count rows for `word`, at most `limit` of them.
    fn top_for_word(&self, word: &str, limit: i32) -> Result<Vec<TopWordEntry>, AdapterError>;
}

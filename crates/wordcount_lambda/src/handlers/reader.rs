use serde_json::Value;
use tracing::info;
use wordcount_core::contract::{TopWordEntry, TopWordsArguments};
use wordcount_core::error::ValidationError;

use crate::adapters::table::WordCountIndex;
use crate::adapters::AdapterError;
use crate::handlers::resolver_arguments;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("invalid top-words request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Resolves `getTopWordCounts`: highest counts recorded for one word.
pub fn handle_top_words_event(
    event: &Value,
    index: &impl WordCountIndex,
) -> Result<Vec<TopWordEntry>, ReaderError> {
    let arguments = resolver_arguments(event).map_err(ReaderError::InvalidRequest)?;
    let arguments: TopWordsArguments = serde_json::from_value(arguments.clone())
        .map_err(|error| ReaderError::InvalidRequest(error.to_string()))?;

    let word = arguments.normalized_word()?;
    let limit = arguments.effective_limit();
    let entries = index.top_for_word(&word, limit)?;

    info!(
        component = "top_words_reader",
        event = "query_completed",
        word = %word,
        limit,
        entries = entries.len(),
    );
    Ok(entries)
}

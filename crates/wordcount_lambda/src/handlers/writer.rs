use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use wordcount_core::contract::WordCountMessage;
use wordcount_core::records::build_records;
use wordcount_core::sharding::ShardPolicy;

use crate::adapters::table::WordCountTable;
use crate::adapters::AdapterError;

#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("invalid SQS event: {0}")]
    InvalidEvent(String),

    #[error("invalid word-count message {message_id}: {source}")]
    InvalidMessage {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{unprocessed} of {total} records for {s3_filename} were not processed")]
    UnprocessedItems {
        s3_filename: String,
        unprocessed: usize,
        total: usize,
    },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub message_id: String,
    pub message: WordCountMessage,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteSummary {
    pub messages: usize,
    pub records_written: usize,
}

/// Persists every queued message as one record per word.
///
/// Any failure, including a partially accepted batch write, fails the whole
/// invocation so the queue redelivers it; rewriting accepted records is
/// harmless because rows are keyed by partition and sort key.
pub fn handle_sqs_event<R: Rng + ?Sized>(
    event: &Value,
    policy: &ShardPolicy,
    table: &impl WordCountTable,
    rng: &mut R,
) -> Result<WriteSummary, WriterError> {
    let messages = decode_sqs_messages(event)?;

    let mut summary = WriteSummary::default();
    for queued in &messages {
        let written = write_message(&queued.message, policy, table, rng).inspect_err(|failure| {
            error!(
                component = "word_count_writer",
                event = "message_failed",
                message_id = %queued.message_id,
                s3_filename = %queued.message.s3_filename,
                error = %failure,
            );
        })?;
        summary.messages += 1;
        summary.records_written += written;
    }

    Ok(summary)
}

pub fn write_message<R: Rng + ?Sized>(
    message: &WordCountMessage,
    policy: &ShardPolicy,
    table: &impl WordCountTable,
    rng: &mut R,
) -> Result<usize, WriterError> {
    let partition_key = policy.partition_key(&message.username, rng);
    let records = build_records(message, &partition_key);
    if records.is_empty() {
        return Ok(0);
    }

    let outcome = table.batch_put(&records)?;
    if outcome.unprocessed > 0 {
        return Err(WriterError::UnprocessedItems {
            s3_filename: message.s3_filename.clone(),
            unprocessed: outcome.unprocessed,
            total: records.len(),
        });
    }

    info!(
        component = "word_count_writer",
        event = "records_written",
        s3_filename = %message.s3_filename,
        partition_key = %partition_key,
        records = outcome.written,
    );
    Ok(outcome.written)
}

pub fn decode_sqs_messages(event: &Value) -> Result<Vec<QueuedMessage>, WriterError> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| WriterError::InvalidEvent("SQS event must include Records array".into()))?;

    let mut messages = Vec::with_capacity(records.len());
    for record in records {
        let message_id = record
            .get("messageId")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let body = record
            .get("body")
            .and_then(Value::as_str)
            .ok_or_else(|| WriterError::InvalidEvent("SQS record body must be a string".into()))?;
        let message = serde_json::from_str(body).map_err(|source| WriterError::InvalidMessage {
            message_id: message_id.clone(),
            source,
        })?;
        messages.push(QueuedMessage {
            message_id,
            message,
        });
    }

    Ok(messages)
}

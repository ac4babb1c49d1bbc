use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use wordcount_core::contract::{
    ProcessingNotification, WordCountMessage, FREQUENCY_THRESHOLD, METADATA_ORIGINAL_FILENAME,
    METADATA_USERNAME, UNKNOWN_ORIGINAL_FILENAME, UPLOAD_DATE_FORMAT,
};
use wordcount_core::sharding::ANONYMOUS_USERNAME;
use wordcount_core::stopwords::StopWords;
use wordcount_core::tokenizer::frequent_words;

use crate::adapters::notifier::ResultNotifier;
use crate::adapters::object_store::UploadStore;
use crate::adapters::queue::WriteQueue;
use crate::adapters::AdapterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorSettings {
    pub upload_bucket: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("invalid S3 event: {0}")]
    InvalidEvent(String),

    #[error("object {key} has no last-modified timestamp")]
    MissingLastModified { key: String },

    #[error("object {key} is not UTF-8 text: {source}")]
    NotUtf8 {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to serialize write message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3ObjectRef {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Notification from a bucket other than the upload bucket.
    Skipped,
    /// No word reached the threshold; nothing was published.
    BelowThreshold,
    Published { words: usize },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub published: usize,
    pub skipped: usize,
    pub below_threshold: usize,
}

impl ProcessingSummary {
    fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Skipped => self.skipped += 1,
            RecordOutcome::BelowThreshold => self.below_threshold += 1,
            RecordOutcome::Published { .. } => self.published += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessorResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Counts words for every object in an S3 notification event.
///
/// Records are handled in order and the first error aborts the invocation,
/// leaving earlier side effects in place; the trigger redelivers the whole
/// event and downstream writes are keyed, so reprocessing is safe.
pub fn handle_s3_event(
    event: &Value,
    settings: &ProcessorSettings,
    stop_words: &StopWords,
    store: &impl UploadStore,
    notifier: &impl ResultNotifier,
    queue: &impl WriteQueue,
) -> Result<ProcessorResponse, ProcessorError> {
    let started_at = Instant::now();
    let objects = decode_s3_records(event)?;

    let mut summary = ProcessingSummary::default();
    for object in &objects {
        let outcome = process_object(object, settings, stop_words, store, notifier, queue)
            .inspect_err(|failure| {
                error!(
                    component = "word_counter",
                    event = "record_failed",
                    bucket = %object.bucket,
                    key = %object.key,
                    error = %failure,
                );
            })?;
        summary.record(outcome);
    }

    info!(
        component = "word_counter",
        event = "batch_completed",
        records = objects.len(),
        published = summary.published,
        skipped = summary.skipped,
        below_threshold = summary.below_threshold,
        duration_ms = started_at.elapsed().as_millis() as u64,
    );

    Ok(ProcessorResponse {
        status_code: 200,
        body: json!({
            "message": "Processing completed, results sent via AppSync and queued for DB write",
            "summary": summary,
        })
        .to_string(),
    })
}

pub fn process_object(
    object: &S3ObjectRef,
    settings: &ProcessorSettings,
    stop_words: &StopWords,
    store: &impl UploadStore,
    notifier: &impl ResultNotifier,
    queue: &impl WriteQueue,
) -> Result<RecordOutcome, ProcessorError> {
    if object.bucket != settings.upload_bucket {
        info!(
            component = "word_counter",
            event = "record_skipped",
            bucket = %object.bucket,
            expected_bucket = %settings.upload_bucket,
        );
        return Ok(RecordOutcome::Skipped);
    }

    let head = store.head_object(&object.bucket, &object.key)?;
    let original_filename = head
        .metadata
        .get(METADATA_ORIGINAL_FILENAME)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_ORIGINAL_FILENAME.to_string());
    let username = head
        .metadata
        .get(METADATA_USERNAME)
        .cloned()
        .unwrap_or_else(|| ANONYMOUS_USERNAME.to_string());
    let upload_date = head
        .last_modified
        .ok_or_else(|| ProcessorError::MissingLastModified {
            key: object.key.clone(),
        })?
        .format(UPLOAD_DATE_FORMAT)
        .to_string();

    let body = store.get_object(&object.bucket, &object.key)?;
    let text = String::from_utf8(body).map_err(|source| ProcessorError::NotUtf8 {
        key: object.key.clone(),
        source,
    })?;

    let words = frequent_words(&text, stop_words, FREQUENCY_THRESHOLD);
    if words.is_empty() {
        info!(
            component = "word_counter",
            event = "below_threshold",
            key = %object.key,
            threshold = FREQUENCY_THRESHOLD,
        );
        return Ok(RecordOutcome::BelowThreshold);
    }

    let notification = ProcessingNotification::new(&object.key, &original_filename, &words);
    notifier.publish(&notification)?;
    info!(
        component = "word_counter",
        event = "notification_published",
        key = %object.key,
        words = words.len(),
    );

    let message = WordCountMessage {
        s3_filename: object.key.clone(),
        original_filename,
        username,
        frequent_words: words,
        upload_date,
    };
    let body = serde_json::to_string(&message)?;
    let message_id = queue.send_message(&body)?;
    info!(
        component = "word_counter",
        event = "message_enqueued",
        key = %object.key,
        message_id = message_id.as_deref().unwrap_or("unknown"),
    );

    Ok(RecordOutcome::Published {
        words: message.frequent_words.len(),
    })
}

pub fn decode_s3_records(event: &Value) -> Result<Vec<S3ObjectRef>, ProcessorError> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| ProcessorError::InvalidEvent("event must include Records array".into()))?;

    let mut objects = Vec::with_capacity(records.len());
    for record in records {
        let bucket = record
            .pointer("/s3/bucket/name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ProcessorError::InvalidEvent("record is missing s3.bucket.name".into())
            })?;
        let raw_key = record
            .pointer("/s3/object/key")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ProcessorError::InvalidEvent("record is missing s3.object.key".into())
            })?;
        objects.push(S3ObjectRef {
            bucket: bucket.to_string(),
            key: decode_object_key(raw_key)?,
        });
    }

    Ok(objects)
}

/// S3 notifications carry form-encoded keys: `+` for space, `%XX` escapes.
pub fn decode_object_key(raw_key: &str) -> Result<String, ProcessorError> {
    let spaced = raw_key.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|error| {
            ProcessorError::InvalidEvent(format!("undecodable key {raw_key}: {error}"))
        })
}

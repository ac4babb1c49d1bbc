//! In-memory stand-ins for the upload store, notification channel, write
//! queue and word-count table.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use wordcount_core::contract::{ProcessingNotification, TopWordEntry, WordCountRecord};
use wordcount_lambda::adapters::notifier::ResultNotifier;
use wordcount_lambda::adapters::object_store::{
    ObjectHead, PresignPutRequest, UploadPresigner, UploadStore,
};
use wordcount_lambda::adapters::queue::WriteQueue;
use wordcount_lambda::adapters::table::{BatchWriteOutcome, WordCountIndex, WordCountTable};
use wordcount_lambda::adapters::AdapterError;

pub const UPLOAD_BUCKET: &str = "wordcount-uploads";

/// Presigns by recording the pending upload; `put` completes it the way a
/// client holding the URL would.
#[derive(Default)]
pub struct MemoryBucket {
    pending: Mutex<HashMap<String, (HashMap<String, String>, Duration)>>,
    objects: Mutex<HashMap<String, (ObjectHead, Vec<u8>)>>,
}

impl MemoryBucket {
    pub fn put(&self, key: &str, body: &str) {
        let (metadata, _) = self
            .pending
            .lock()
            .expect("poisoned mutex")
            .remove(key)
            .expect("upload must be presigned first");
        let head = ObjectHead {
            metadata,
            last_modified: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).single(),
        };
        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert(key.to_string(), (head, body.as_bytes().to_vec()));
    }

    pub fn pending_expiry(&self, key: &str) -> Option<Duration> {
        self.pending
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|(_, expiry)| *expiry)
    }
}

impl UploadPresigner for MemoryBucket {
    fn presign_put(&self, request: &PresignPutRequest<'_>) -> Result<String, AdapterError> {
        let metadata = request
            .metadata
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        self.pending
            .lock()
            .expect("poisoned mutex")
            .insert(request.key.to_string(), (metadata, request.expires_in));
        Ok(format!("https://{UPLOAD_BUCKET}.s3.amazonaws.com/{}", request.key))
    }
}

impl UploadStore for MemoryBucket {
    fn head_object(&self, _bucket: &str, key: &str) -> Result<ObjectHead, AdapterError> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|(head, _)| head.clone())
            .ok_or_else(|| AdapterError::ObjectStore(format!("NoSuchKey: {key}")))
    }

    fn get_object(&self, _bucket: &str, key: &str) -> Result<Vec<u8>, AdapterError> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| AdapterError::ObjectStore(format!("NoSuchKey: {key}")))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<ProcessingNotification>>,
}

impl RecordingNotifier {
    pub fn published(&self) -> Vec<ProcessingNotification> {
        self.published.lock().expect("poisoned mutex").clone()
    }
}

impl ResultNotifier for RecordingNotifier {
    fn publish(&self, notification: &ProcessingNotification) -> Result<(), AdapterError> {
        self.published
            .lock()
            .expect("poisoned mutex")
            .push(notification.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryQueue {
    bodies: Mutex<Vec<String>>,
}

impl MemoryQueue {
    /// Drains queued bodies into an SQS-shaped Lambda event.
    pub fn drain_as_sqs_event(&self) -> Value {
        let bodies: Vec<String> = self.bodies.lock().expect("poisoned mutex").drain(..).collect();
        let records: Vec<Value> = bodies
            .into_iter()
            .enumerate()
            .map(|(index, body)| {
                json!({
                    "messageId": format!("message-{index}"),
                    "eventSource": "aws:sqs",
                    "body": body,
                })
            })
            .collect();
        json!({ "Records": records })
    }

    pub fn len(&self) -> usize {
        self.bodies.lock().expect("poisoned mutex").len()
    }
}

impl WriteQueue for MemoryQueue {
    fn send_message(&self, body: &str) -> Result<Option<String>, AdapterError> {
        let mut bodies = self.bodies.lock().expect("poisoned mutex");
        bodies.push(body.to_string());
        Ok(Some(format!("message-{}", bodies.len())))
    }
}

/// Rows keyed by (ShardedUsername, UUIDWord), overwritten on repeat puts.
#[derive(Default)]
pub struct MemoryTable {
    rows: Mutex<BTreeMap<(String, String), WordCountRecord>>,
}

impl MemoryTable {
    pub fn rows(&self) -> Vec<WordCountRecord> {
        self.rows
            .lock()
            .expect("poisoned mutex")
            .values()
            .cloned()
            .collect()
    }
}

impl WordCountTable for MemoryTable {
    fn batch_put(&self, records: &[WordCountRecord]) -> Result<BatchWriteOutcome, AdapterError> {
        let mut rows = self.rows.lock().expect("poisoned mutex");
        for record in records {
            rows.insert(
                (record.sharded_username.clone(), record.uuid_word.clone()),
                record.clone(),
            );
        }
        Ok(BatchWriteOutcome {
            written: records.len(),
            unprocessed: 0,
        })
    }
}

impl WordCountIndex for MemoryTable {
    fn top_for_word(&self, word: &str, limit: i32) -> Result<Vec<TopWordEntry>, AdapterError> {
        let mut entries: Vec<TopWordEntry> = self
            .rows()
            .into_iter()
            .filter(|row| row.word == word)
            .map(|row| TopWordEntry {
                word: row.word,
                count: row.count,
                original_filename: row.original_filename,
            })
            .collect();
        entries.sort_by(|left, right| right.count.cmp(&left.count));
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }
}

pub fn s3_put_event(key: &str) -> Value {
    json!({
        "Records": [{
            "eventSource": "aws:s3",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": {"name": UPLOAD_BUCKET},
                "object": {"key": key}
            }
        }]
    })
}

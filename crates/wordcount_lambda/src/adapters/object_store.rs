use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::AdapterError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectHead {
    /// User metadata without the `x-amz-meta-` prefix.
    pub metadata: HashMap<String, String>,
    pub last_modified: Option<DateTime<Utc>>,
}

pub trait UploadStore {
    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, AdapterError>;

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, AdapterError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignPutRequest<'a> {
    pub key: &'a str,
    pub content_type: &'a str,
    pub metadata: Vec<(&'a str, &'a str)>,
    pub expires_in: Duration,
}

pub trait UploadPresigner {
    /// Returns a URL that lets its holder PUT exactly `request.key` once the
    /// signed headers are supplied.
    fn presign_put(&self, request: &PresignPutRequest<'_>) -> Result<String, AdapterError>;
}

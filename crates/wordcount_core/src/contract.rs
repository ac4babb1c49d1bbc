use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum occurrences for a word to be reported.
pub const FREQUENCY_THRESHOLD: u64 = 10;
pub const PRESIGNED_URL_EXPIRY_SECS: u64 = 300;

pub const METADATA_ORIGINAL_FILENAME: &str = "original-filename";
pub const METADATA_USERNAME: &str = "username";
pub const UNKNOWN_ORIGINAL_FILENAME: &str = "unknown";
pub const UPLOAD_DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_TOP_WORDS_LIMIT: i32 = 10;
pub const MAX_TOP_WORDS_LIMIT: i32 = 100;

/// Word to occurrence count, only for words at or above the threshold.
pub type FrequentWords = BTreeMap<String, u64>;

/// Arguments of the `generatePresignedUrl` resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PresignArguments {
    pub key: String,
    pub content_type: String,
    pub original_filename: String,
    pub username: String,
}

impl PresignArguments {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("key", &self.key),
            ("contentType", &self.content_type),
            ("originalFilename", &self.original_filename),
            ("username", &self.username),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::new(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Resolver result: exactly one of `presignedUrl` or `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PresignResponse {
    Issued {
        #[serde(rename = "presignedUrl")]
        presigned_url: String,
    },
    Failed {
        error: String,
    },
}

impl PresignResponse {
    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCountEntry {
    pub word: String,
    pub count: u64,
}

/// Variables of the `completeProcessing` mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingNotification {
    pub s3_filename: String,
    pub original_filename: String,
    pub frequent_words: Vec<WordCountEntry>,
}

impl ProcessingNotification {
    pub fn new(
        s3_filename: impl Into<String>,
        original_filename: impl Into<String>,
        frequent_words: &FrequentWords,
    ) -> Self {
        Self {
            s3_filename: s3_filename.into(),
            original_filename: original_filename.into(),
            frequent_words: frequent_words
                .iter()
                .map(|(word, count)| WordCountEntry {
                    word: word.clone(),
                    count: *count,
                })
                .collect(),
        }
    }
}

/// Durable-write message body carried on the write queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCountMessage {
    pub s3_filename: String,
    pub original_filename: String,
    pub username: String,
    pub frequent_words: FrequentWords,
    pub upload_date: String,
}

/// One persisted row per (document, word).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCountRecord {
    pub sharded_username: String,
    pub uuid_word: String,
    pub uuid: String,
    pub word: String,
    pub count: u64,
    pub original_filename: String,
    pub username: String,
    pub upload_date: String,
}

/// Arguments of the `getTopWordCounts` resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopWordsArguments {
    pub word: String,
    #[serde(default)]
    pub limit: Option<i32>,
}

impl TopWordsArguments {
    pub fn normalized_word(&self) -> Result<String, ValidationError> {
        let word = self.word.trim().to_lowercase();
        if word.is_empty() {
            return Err(ValidationError::new("word must not be empty"));
        }
        Ok(word)
    }

    pub fn effective_limit(&self) -> i32 {
        self.limit
            .unwrap_or(DEFAULT_TOP_WORDS_LIMIT)
            .clamp(1, MAX_TOP_WORDS_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopWordEntry {
    pub word: String,
    pub count: u64,
    pub original_filename: String,
}

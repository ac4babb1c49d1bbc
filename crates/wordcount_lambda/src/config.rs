//! Environment configuration for each Lambda binary.
//!
//! Every config is built from a lookup function so tests can supply values
//! without touching the process environment.

use std::path::PathBuf;
use std::str::FromStr;

use wordcount_core::sharding::{ShardPolicy, DEFAULT_ANONYMOUS_SHARD_COUNT};

use crate::handlers::processor::ProcessorSettings;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_STOPWORDS_DIR: &str = "/opt/python/stopwords";
pub const DEFAULT_TABLE_NAME: &str = "WordCountTable";
pub const DEFAULT_INDEX_NAME: &str = "WordCountIndex";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    pub bucket: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub upload_bucket: String,
    pub appsync_endpoint: String,
    pub queue_url: String,
    pub region: String,
    pub stopwords_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    pub table_name: String,
    pub shard_policy: ShardPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub table_name: String,
    pub index_name: String,
}

impl IssuerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bucket = match non_empty(&lookup, "BUCKET_NAME") {
            Some(bucket) => bucket,
            None => required(&lookup, "UPLOAD_BUCKET")?,
        };
        Ok(Self { bucket })
    }
}

impl ProcessorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            upload_bucket: required(&lookup, "UPLOAD_BUCKET")?,
            appsync_endpoint: required(&lookup, "APPSYNC_API_ENDPOINT")?,
            queue_url: required(&lookup, "QUEUE_URL")?,
            region: non_empty(&lookup, "AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            stopwords_dir: non_empty(&lookup, "STOPWORDS_DIR")
                .unwrap_or_else(|| DEFAULT_STOPWORDS_DIR.to_string())
                .into(),
        })
    }

    pub fn settings(&self) -> ProcessorSettings {
        ProcessorSettings {
            upload_bucket: self.upload_bucket.clone(),
        }
    }
}

impl WriterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let shard_count: u32 = parsed(
            &lookup,
            "ANONYMOUS_SHARD_COUNT",
            DEFAULT_ANONYMOUS_SHARD_COUNT,
        )?;
        let shard_policy = ShardPolicy::new(shard_count).map_err(|error| ConfigError::Invalid {
            name: "ANONYMOUS_SHARD_COUNT",
            value: shard_count.to_string(),
            reason: error.to_string(),
        })?;

        Ok(Self {
            table_name: table_name(&lookup),
            shard_policy,
        })
    }
}

impl ReaderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: table_name(&lookup),
            index_name: non_empty(&lookup, "WORD_COUNT_INDEX")
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
        })
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn table_name(lookup: &impl Fn(&str) -> Option<String>) -> String {
    non_empty(lookup, "WORD_COUNT_TABLE").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string())
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    non_empty(lookup, name).ok_or(ConfigError::Missing(name))
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|error: T::Err| ConfigError::Invalid {
            name,
            reason: error.to_string(),
            value,
        }),
    }
}

//! Shared word-count pipeline domain primitives.
//!
//! This crate owns tokenization, stopword filtering, thresholding, anonymous
//! identity sharding and the wire contracts exchanged between handlers. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod error;
pub mod records;
pub mod sharding;
pub mod stopwords;
pub mod tokenizer;

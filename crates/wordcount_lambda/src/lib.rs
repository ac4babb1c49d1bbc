//! AWS-oriented adapters and handlers for the word-count pipeline.
//!
//! Handlers are plain synchronous functions written against the adapter
//! traits in [`adapters`]; the [`aws`] module implements those traits with the
//! AWS SDK, and the binaries wire both into the Lambda runtime.

pub mod adapters;
pub mod aws;
pub mod config;
pub mod handlers;
pub mod telemetry;

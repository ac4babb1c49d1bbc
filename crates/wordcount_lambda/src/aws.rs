//! AWS SDK implementations of the adapter traits.
//!
//! Handlers are synchronous, so each call parks the current Tokio worker with
//! `block_in_place` and drives the SDK future to completion. Binaries must
//! run on the multi-threaded runtime.

pub mod appsync;
pub mod dynamodb;
pub mod s3;
pub mod sqs;

use std::future::Future;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

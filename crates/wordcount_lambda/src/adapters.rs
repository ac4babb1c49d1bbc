//! Seams to the external collaborators: upload store, notification channel,
//! write queue and word-count table.

pub mod notifier;
pub mod object_store;
pub mod queue;
pub mod table;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("object store error: {0}")]
    ObjectStore(String),

    #[error("presign error: {0}")]
    Presign(String),

    #[error("notification error: {0}")]
    Notification(String),

    #[error("queue error: {0}")]
    Queue(String),

    #[error("table error: {0}")]
    Table(String),
}

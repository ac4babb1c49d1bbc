use super::AdapterError;

pub trait WriteQueue {
    /// Sends one message body and returns the queue-assigned message id.
    fn send_message(&self, body: &str) -> Result<Option<String>, AdapterError>;
}

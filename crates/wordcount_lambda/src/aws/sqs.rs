use aws_sdk_sqs::error::DisplayErrorContext;

use crate::adapters::queue::WriteQueue;
use crate::adapters::AdapterError;

use super::block_on;

pub struct SqsWriteQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsWriteQueue {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

impl WriteQueue for SqsWriteQueue {
    fn send_message(&self, body: &str) -> Result<Option<String>, AdapterError> {
        let output = block_on(
            self.client
                .send_message()
                .queue_url(&self.queue_url)
                .message_body(body)
                .send(),
        )
        .map_err(|error| {
            AdapterError::Queue(format!(
                "failed to enqueue message: {}",
                DisplayErrorContext(&error)
            ))
        })?;

        Ok(output.message_id().map(str::to_string))
    }
}

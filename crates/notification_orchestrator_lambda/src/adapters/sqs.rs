use aws_sdk_sqs::error::DisplayErrorContext;
use notification_orchestrator_core::publisher::{PublishError, QueuePublisher};

#[derive(Clone)]
pub struct SqsQueuePublisher {
    client: aws_sdk_sqs::Client,
}

impl SqsQueuePublisher {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }
}

impl QueuePublisher for SqsQueuePublisher {
    async fn publish(&self, queue_url: &str, body: String) -> Result<(), PublishError> {
        self.client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                PublishError::new(format!(
                    "failed to send message to {queue_url}: {}",
                    DisplayErrorContext(&error)
                ))
            })
    }
}

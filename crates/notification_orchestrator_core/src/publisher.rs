use std::future::Future;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct PublishError {
    message: String,
}

impl PublishError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sends one message body to a durable queue. No batching.
pub trait QueuePublisher: Sync {
    fn publish(
        &self,
        queue_url: &str,
        body: String,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::aggregator::{RelationshipRepository, RetrievalError};
use crate::context::{Canceled, DispatchContext};
use crate::contract::to_envelope;
use crate::publisher::{PublishError, QueuePublisher};
use crate::relationship::Relationship;
use crate::store::RecordStore;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("error retrieving relationships with email notifications enabled: {0}")]
    RetrievalFailed(#[source] RetrievalError),
    #[error("error marshaling notification message {index} to JSON: {source}")]
    EncodingFailed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("error sending notification message {index} to queue: {source}")]
    PublishFailed {
        index: usize,
        #[source]
        source: PublishError,
    },
    #[error("dispatch canceled: {0}")]
    Canceled(#[source] Canceled),
}

impl From<RetrievalError> for DispatchError {
    fn from(error: RetrievalError) -> Self {
        match error {
            RetrievalError::Canceled(canceled) => Self::Canceled(canceled),
            other => Self::RetrievalFailed(other),
        }
    }
}

/// Outcome of a completed invocation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DispatchReport {
    pub retrieved: usize,
    pub published: usize,
}

/// Fans out one reminder notification per email-enabled relationship.
///
/// Built once per process and reused across invocations; it holds no state
/// between runs.
pub struct NotificationOrchestrator<S, P> {
    repository: RelationshipRepository<S>,
    publisher: P,
    queue_url: String,
}

impl<S, P> NotificationOrchestrator<S, P>
where
    S: RecordStore,
    P: QueuePublisher,
{
    pub fn new(
        repository: RelationshipRepository<S>,
        publisher: P,
        queue_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            publisher,
            queue_url: queue_url.into(),
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Publishes sequentially and stops at the first failure. Messages already
    /// published stay on the queue; the caller reports the whole invocation as
    /// failed and relies on the trigger to re-run the full scan.
    pub async fn dispatch(&self, ctx: &DispatchContext) -> Result<DispatchReport, DispatchError> {
        let relationships = self
            .repository
            .fetch_email_enabled_relationships(ctx)
            .await
            .map_err(|error| {
                error!(error = %error, "error retrieving relationships with email notifications enabled");
                DispatchError::from(error)
            })?;

        info!(count = relationships.len(), "retrieved relationships");

        let retrieved = relationships.len();
        for (index, relationship) in relationships.into_iter().enumerate() {
            self.publish_reminder(ctx, index, relationship).await?;
        }

        info!(published = retrieved, "notification processing completed successfully");
        Ok(DispatchReport {
            retrieved,
            published: retrieved,
        })
    }

    async fn publish_reminder(
        &self,
        ctx: &DispatchContext,
        index: usize,
        relationship: Relationship,
    ) -> Result<(), DispatchError> {
        let body = to_envelope(relationship).to_wire().map_err(|source| {
            error!(index, error = %source, "error marshaling notification message to JSON");
            DispatchError::EncodingFailed { index, source }
        })?;

        match ctx.run(self.publisher.publish(&self.queue_url, body)).await {
            Ok(Ok(())) => {
                debug!(index, "notification message sent");
                Ok(())
            }
            Ok(Err(source)) => {
                error!(index, error = %source, "error sending message to queue");
                Err(DispatchError::PublishFailed { index, source })
            }
            Err(canceled) => {
                error!(index, "publish canceled");
                Err(DispatchError::Canceled(canceled))
            }
        }
    }
}

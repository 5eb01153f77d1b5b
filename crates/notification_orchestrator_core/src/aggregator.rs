use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn, Instrument};

use crate::context::{Canceled, DispatchContext};
use crate::contract::{
    EMAIL_NOTIFICATIONS_ELIGIBLE, EMAIL_NOTIFICATIONS_INDEX, EMAIL_NOTIFICATIONS_INDEX_KEY,
};
use crate::relationship::{Relationship, RelationshipItem};
use crate::store::{IndexQuery, RawRecord, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to query relationships (page {page}): {source}")]
    Query {
        page: usize,
        #[source]
        source: StoreError,
    },
    #[error("failed to decode relationship {position} of page {page}: {source}")]
    Decode {
        page: usize,
        position: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Canceled(#[from] Canceled),
}

pub fn email_notifications_query() -> IndexQuery {
    IndexQuery {
        index_name: EMAIL_NOTIFICATIONS_INDEX.to_string(),
        key_attribute: EMAIL_NOTIFICATIONS_INDEX_KEY.to_string(),
        key_value: EMAIL_NOTIFICATIONS_ELIGIBLE,
    }
}

/// Reads relationships from the relationship table through a [`RecordStore`].
pub struct RelationshipRepository<S> {
    store: S,
}

impl<S: RecordStore> RelationshipRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drains every page of the email notifications index.
    ///
    /// All-or-nothing: a query, decode or cancellation failure on any page
    /// discards what earlier pages returned. Records the store returns with
    /// email notifications disabled are dropped.
    pub async fn fetch_email_enabled_relationships(
        &self,
        ctx: &DispatchContext,
    ) -> Result<Vec<Relationship>, RetrievalError> {
        let span = tracing::info_span!("relationship_repository", table_name = self.store.table_name());
        self.drain_email_notifications_index(ctx)
            .instrument(span)
            .await
    }

    async fn drain_email_notifications_index(
        &self,
        ctx: &DispatchContext,
    ) -> Result<Vec<Relationship>, RetrievalError> {
        info!("getting relationships with email notifications enabled");

        let query = email_notifications_query();
        let mut relationships = Vec::new();
        let mut cursor = None;
        let mut page = 0;

        loop {
            let result = match ctx.run(self.store.query_page(&query, cursor.take())).await {
                Ok(result) => result,
                Err(canceled) => {
                    error!(page, "relationship query canceled");
                    return Err(canceled.into());
                }
            };
            let records = match result {
                Ok(records) => records,
                Err(source) => {
                    error!(page, error = %source, "failed to query relationships by email notification");
                    return Err(RetrievalError::Query { page, source });
                }
            };

            debug!(page, count = records.records.len(), "received relationship page");
            for (position, record) in records.records.into_iter().enumerate() {
                let relationship = decode_relationship(record).map_err(|source| {
                    error!(page, position, error = %source, "failed to unmarshal relationship");
                    RetrievalError::Decode {
                        page,
                        position,
                        source,
                    }
                })?;

                if relationship.email_notifications {
                    relationships.push(relationship);
                } else {
                    warn!(
                        page,
                        position,
                        user_id = %relationship.user_id,
                        receiver_id = %relationship.receiver_id,
                        "skipping relationship with email notifications disabled"
                    );
                }
            }

            match records.next {
                Some(next) => {
                    cursor = Some(next);
                    page += 1;
                }
                None => break,
            }
        }

        info!(
            count = relationships.len(),
            pages = page + 1,
            "successfully retrieved relationships with email notifications"
        );
        Ok(relationships)
    }
}

fn decode_relationship(record: RawRecord) -> Result<Relationship, serde_json::Error> {
    serde_json::from_value::<RelationshipItem>(Value::Object(record)).map(Relationship::from)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_targets_email_notifications_index() {
        let query = email_notifications_query();

        assert_eq!(query.index_name, "email_notifications");
        assert_eq!(query.key_attribute, "email_notifications_gsi_pk");
        assert_eq!(query.key_value, 1);
    }

    #[test]
    fn decode_rejects_wrongly_typed_attribute() {
        let record = json!({"user_id": false})
            .as_object()
            .cloned()
            .expect("object literal");

        assert!(decode_relationship(record).is_err());
    }

    #[test]
    fn decode_defaults_missing_flag_to_false() {
        let record = json!({
            "user_id": "User#1",
            "receiver_id": "Receiver#1",
            "email_notifications": true,
            "email_notifications_gsi_pk": 1
        })
        .as_object()
        .cloned()
        .expect("object literal");

        assert_eq!(
            decode_relationship(record).expect("record should decode"),
            Relationship::new("User#1", "Receiver#1", false, true)
        );
    }
}

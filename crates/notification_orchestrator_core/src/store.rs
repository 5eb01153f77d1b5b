use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;

/// One item as returned by the store, attribute name to decoded value.
pub type RawRecord = Map<String, Value>;

/// Equality match on a numeric index partition key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub index_name: String,
    pub key_attribute: String,
    pub key_value: i64,
}

impl IndexQuery {
    pub fn key_placeholder(&self) -> String {
        format!(":{}", self.key_attribute)
    }

    pub fn key_condition_expression(&self) -> String {
        format!("{} = {}", self.key_attribute, self.key_placeholder())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage<C> {
    pub records: Vec<RawRecord>,
    /// `None` once the store has no further pages.
    pub next: Option<C>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Paginated index query against a table.
///
/// `Cursor` is the store's opaque continuation token. Page sizes are chosen by
/// the store.
pub trait RecordStore: Sync {
    type Cursor: Send;

    fn table_name(&self) -> &str;

    fn query_page(
        &self,
        query: &IndexQuery,
        cursor: Option<Self::Cursor>,
    ) -> impl Future<Output = Result<RecordPage<Self::Cursor>, StoreError>> + Send;
}

use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use notification_orchestrator_core::store::{
    IndexQuery, RawRecord, RecordPage, RecordStore, StoreError,
};
use serde_json::{Number, Value};

pub type Item = HashMap<String, AttributeValue>;

/// [`RecordStore`] over a DynamoDB table. The continuation token is the
/// query's `LastEvaluatedKey`.
#[derive(Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RecordStore for DynamoRecordStore {
    type Cursor = Item;

    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn query_page(
        &self,
        query: &IndexQuery,
        cursor: Option<Item>,
    ) -> Result<RecordPage<Item>, StoreError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&query.index_name)
            .key_condition_expression(query.key_condition_expression())
            .expression_attribute_values(
                query.key_placeholder(),
                AttributeValue::N(query.key_value.to_string()),
            )
            .set_exclusive_start_key(cursor)
            .send()
            .await
            .map_err(|error| {
                StoreError::new(format!(
                    "failed to query index {} of {}: {}",
                    query.index_name,
                    self.table_name,
                    DisplayErrorContext(&error)
                ))
            })?;

        Ok(RecordPage {
            records: output
                .items
                .unwrap_or_default()
                .into_iter()
                .map(item_to_record)
                .collect(),
            next: output.last_evaluated_key.filter(|key| !key.is_empty()),
        })
    }
}

pub fn item_to_record(item: Item) -> RawRecord {
    item.into_iter()
        .map(|(name, value)| (name, attribute_to_json(value)))
        .collect()
}

/// Binary attributes have no JSON counterpart and decode as `null`.
pub fn attribute_to_json(value: AttributeValue) -> Value {
    match value {
        AttributeValue::S(text) => Value::String(text),
        AttributeValue::N(number) => number_to_json(number),
        AttributeValue::Bool(flag) => Value::Bool(flag),
        AttributeValue::M(map) => Value::Object(item_to_record(map)),
        AttributeValue::L(list) => Value::Array(list.into_iter().map(attribute_to_json).collect()),
        AttributeValue::Ss(strings) => Value::Array(strings.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(numbers) => {
            Value::Array(numbers.into_iter().map(number_to_json).collect())
        }
        _ => Value::Null,
    }
}

fn number_to_json(number: String) -> Value {
    if let Ok(integer) = number.parse::<i64>() {
        return Value::from(integer);
    }
    number
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::String(number))
}

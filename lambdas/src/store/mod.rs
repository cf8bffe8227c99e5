//! Data access for the todo table.
//!
//! Handlers only see [`ItemStore`]: one unconditional write and one full scan.
//! Records come back in their native DynamoDB encoding and are turned into
//! plain JSON by [`unmarshall`].

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use crate::common::errors::StoreError;
use crate::common::TodoItem;

mod dynamo;
#[cfg(any(test, feature = "test-util"))]
mod memory;

pub use dynamo::DynamoItemStore;
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryItemStore;

/// A record as the store encodes it.
pub type Record = HashMap<String, AttributeValue>;

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes `item` under its id, replacing any record already stored there.
    async fn put(&self, item: TodoItem) -> Result<(), StoreError>;

    /// Returns every record in the table.
    async fn scan_all(&self) -> Result<Vec<Record>, StoreError>;
}

/// Converts a stored record into a plain JSON object.
pub fn unmarshall(record: Record) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(name, value)| (name, attribute_to_json(value)))
        .collect()
}

fn attribute_to_json(value: AttributeValue) -> Value {
    match value {
        AttributeValue::S(val) => Value::String(val),
        AttributeValue::N(val) => number_to_json(val),
        AttributeValue::Bool(val) => Value::Bool(val),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(values.into_iter().map(attribute_to_json).collect()),
        AttributeValue::M(values) => Value::Object(unmarshall(values)),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(values.into_iter().map(number_to_json).collect()),
        AttributeValue::B(blob) => blob_to_json(blob),
        AttributeValue::Bs(blobs) => Value::Array(blobs.into_iter().map(blob_to_json).collect()),
        // Variants added by newer SDK versions.
        _ => Value::Null,
    }
}

fn number_to_json(val: String) -> Value {
    if let Ok(int) = val.parse::<i64>() {
        return Value::Number(int.into());
    }

    val.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::String(val))
}

fn blob_to_json(blob: Blob) -> Value {
    Value::Array(blob.into_inner().into_iter().map(Value::from).collect())
}

use async_trait::async_trait;
use tracing::info;

use crate::common::errors::StoreError;
use crate::common::TodoItem;
use crate::store::{ItemStore, Record};

/// DynamoDB-backed store. The client is built once per process and shared by
/// every invocation.
#[derive(Debug, Clone)]
pub struct DynamoItemStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoItemStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn put(&self, item: TodoItem) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item.into()))
            .send()
            .await
            .map_err(StoreError::from_sdk)?;

        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Record>, StoreError> {
        let records = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(StoreError::from_sdk)?;

        info!("Scanned {} items from {}", records.len(), self.table_name);
        Ok(records)
    }
}

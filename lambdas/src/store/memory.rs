use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::errors::StoreError;
use crate::common::TodoItem;
use crate::store::{ItemStore, Record};

/// Test double for the table: an in-process store keyed by id, with the same
/// overwrite semantics. Clones share the same records. Only built for tests
/// and under the `test-util` feature.
#[derive(Debug, Default, Clone)]
pub struct MemoryItemStore {
    records: Arc<RwLock<BTreeMap<String, Record>>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn put(&self, item: TodoItem) -> Result<(), StoreError> {
        let id = item.id.clone();
        self.records.write().await.insert(id, item.into());
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::store::container::{Container, Document, PartitionKey, StoreError};

/// In-memory document container keyed by the composite partition key.
/// Uniqueness lives on the (tenant, record id) pair; the document-level `id`
/// field is only data and is matched by `query_items`.
pub struct MemoryContainer {
    name: String,
    items: DashMap<PartitionKey, Document>,
}

impl MemoryContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn checkpoint(cancel: &CancellationToken) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        Ok(())
    }
}

#[async_trait]
impl Container for MemoryContainer {
    async fn query_items(
        &self,
        document_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Document>, StoreError> {
        Self::checkpoint(cancel)?;

        let items: Vec<Document> = self
            .items
            .iter()
            .filter(|entry| {
                entry
                    .value()
                    .get("id")
                    .and_then(Document::as_str)
                    .is_some_and(|id| id == document_id)
            })
            .map(|entry| entry.value().clone())
            .collect();

        debug!(container = %self.name, document_id, count = items.len(), "query completed");
        Ok(items)
    }

    async fn read_item(
        &self,
        key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Document, StoreError> {
        Self::checkpoint(cancel)?;

        self.items
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create_item(
        &self,
        key: &PartitionKey,
        item: Document,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        Self::checkpoint(cancel)?;

        match self.items.entry(key.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(vacant) => {
                vacant.insert(item);
                Ok(())
            }
        }
    }

    async fn upsert_item(
        &self,
        key: &PartitionKey,
        item: Document,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        Self::checkpoint(cancel)?;

        self.items.insert(key.clone(), item);
        Ok(())
    }

    async fn delete_item(
        &self,
        key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        Self::checkpoint(cancel)?;

        self.items
            .remove(key)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Documents cross the store boundary as plain JSON values; the repository
/// owns the typed entity shape.
pub type Document = serde_json::Value;

/// Two-level hierarchical partition key: (tenant, record id). Every point
/// read, write and delete addresses exactly this pair; there is no secondary
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    tenant: String,
    record_id: String,
}

impl PartitionKey {
    pub fn new(tenant: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            record_id: record_id.into(),
        }
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("document already exists")]
    Conflict,
    #[error("operation cancelled")]
    Cancelled,
    #[error("store failure: {0}")]
    Backend(String),
}

/// The narrow contract against the partitioned document store. Lookups report
/// a missing document as `StoreError::NotFound` in the signature rather than
/// as a backend failure, so callers can translate it without inspecting
/// messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Container: Send + Sync {
    /// Fetch every document whose document-level id matches. The current
    /// scheme stores the tenant there, so this is the tenant bulk read.
    async fn query_items(
        &self,
        document_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Document>, StoreError>;

    async fn read_item(
        &self,
        key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Document, StoreError>;

    /// Create only; an existing document under the same key is a `Conflict`.
    async fn create_item(
        &self,
        key: &PartitionKey,
        item: Document,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn upsert_item(
        &self,
        key: &PartitionKey,
        item: Document,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;

    async fn delete_item(
        &self,
        key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError>;
}

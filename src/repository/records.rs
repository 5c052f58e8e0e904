use std::marker::PhantomData;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Record, RecordDetails};
use crate::repository::entity::{self, RecordEntity};
use crate::repository::filter::Filter;
use crate::store::{Container, PartitionKey, StoreError};
use crate::utils::RecordError;

/// Generic data access for one record kind. All store interaction goes
/// through here: bulk reads with client-side filtering, and point operations
/// addressed by the composite (tenant, record id) partition key.
pub struct RecordRepository<D> {
    container: Arc<dyn Container>,
    _kind: PhantomData<fn() -> D>,
}

impl<D: RecordDetails> RecordRepository<D> {
    pub fn new(container: Arc<dyn Container>) -> Self {
        Self {
            container,
            _kind: PhantomData,
        }
    }

    /// Fetch every record of the tenant, then narrow with the filter. The
    /// result set is unbounded and held fully in memory.
    pub async fn get_all(
        &self,
        tenant: &str,
        filter: &Filter,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record<D>>, RecordError> {
        let items = self.container.query_items(tenant, cancel).await?;

        let mut entities = Vec::with_capacity(items.len());
        for item in items {
            entities.push(decode(item)?);
        }

        let entities = filter.apply(entities);
        debug!(kind = D::KIND, tenant, count = entities.len(), "fetched filtered records");

        entities.iter().map(entity::to_record).collect()
    }

    /// Point read by composite key. A store-level miss is a plain `None`;
    /// callers tell "no such record" apart from transport failure by this
    /// translation.
    pub async fn get(
        &self,
        tenant: &str,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Option<Record<D>>, RecordError> {
        let key = key_for(tenant, id);

        match self.container.read_item(&key, cancel).await {
            Ok(item) => Ok(Some(entity::to_record(&decode(item)?)?)),
            Err(StoreError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Create the document under its composite key. An existing document
    /// there surfaces as a generic persistence failure.
    pub async fn insert(
        &self,
        tenant: &str,
        record: &Record<D>,
        cancel: &CancellationToken,
    ) -> Result<(), RecordError> {
        let entity = entity::to_entity(tenant, record)?;
        let key = key_for(tenant, record.id);

        self.container
            .create_item(&key, encode(&entity)?, cancel)
            .await?;

        debug!(kind = D::KIND, tenant, id = %record.id, "record inserted");
        Ok(())
    }

    /// Read-modify-write: fetch the entity, overwrite its mutable fields,
    /// write it back. Not compare-and-swap; concurrent updates on the same
    /// key are last-write-wins.
    pub async fn update(
        &self,
        tenant: &str,
        id: Uuid,
        details: &D,
        cancel: &CancellationToken,
    ) -> Result<Record<D>, RecordError> {
        let key = key_for(tenant, id);

        let item = match self.container.read_item(&key, cancel).await {
            Ok(item) => item,
            Err(StoreError::NotFound) => return Err(RecordError::NotFound(id)),
            Err(err) => return Err(err.into()),
        };

        let mut entity: RecordEntity = decode(item)?;
        entity::apply_details(&mut entity, details)?;

        self.container
            .upsert_item(&key, encode(&entity)?, cancel)
            .await?;

        debug!(kind = D::KIND, tenant, id = %id, "record updated");
        entity::to_record(&entity)
    }

    /// Remove by composite key. Deleting an absent record is a not-found
    /// failure, not silent success.
    pub async fn delete(
        &self,
        tenant: &str,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), RecordError> {
        let key = key_for(tenant, id);

        match self.container.delete_item(&key, cancel).await {
            Ok(()) => {
                debug!(kind = D::KIND, tenant, id = %id, "record deleted");
                Ok(())
            }
            Err(StoreError::NotFound) => Err(RecordError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}

fn key_for(tenant: &str, id: Uuid) -> PartitionKey {
    PartitionKey::new(tenant, id.to_string())
}

fn decode(item: serde_json::Value) -> Result<RecordEntity, RecordError> {
    serde_json::from_value(item)
        .map_err(|e| RecordError::Persistence(format!("malformed stored document: {e}")))
}

fn encode(entity: &RecordEntity) -> Result<serde_json::Value, RecordError> {
    serde_json::to_value(entity)
        .map_err(|e| RecordError::Persistence(format!("unserializable document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDetails};
    use crate::store::MemoryContainer;
    use chrono::{TimeZone, Utc};

    fn repository() -> RecordRepository<ExpenseDetails> {
        RecordRepository::new(Arc::new(MemoryContainer::new("expenses")))
    }

    fn record(day: u32, category: Category) -> Record<ExpenseDetails> {
        Record {
            id: Uuid::new_v4(),
            details: ExpenseDetails {
                value: 10.0,
                date: Some(Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()),
                reason: "r".to_string(),
                category: Some(category),
            },
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_field_equal() {
        let repository = repository();
        let cancel = CancellationToken::new();
        let record = record(15, Category::Sport);

        repository.insert("alice", &record, &cancel).await.unwrap();
        let fetched = repository.get("alice", record.id, &cancel).await.unwrap();

        assert_eq!(fetched, Some(record));
    }

    #[tokio::test]
    async fn get_of_absent_id_is_none() {
        let repository = repository();
        let cancel = CancellationToken::new();

        let fetched = repository.get("alice", Uuid::new_v4(), &cancel).await.unwrap();
        assert_eq!(fetched, None);
    }

    #[tokio::test]
    async fn records_are_scoped_to_their_tenant() {
        let repository = repository();
        let cancel = CancellationToken::new();
        let record = record(15, Category::Sport);

        repository.insert("alice", &record, &cancel).await.unwrap();

        let from_bob = repository.get("bob", record.id, &cancel).await.unwrap();
        assert_eq!(from_bob, None);

        let listed = repository
            .get_all("bob", &Filter::default(), &cancel)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_persistence_failure() {
        let repository = repository();
        let cancel = CancellationToken::new();
        let record = record(15, Category::Sport);

        repository.insert("alice", &record, &cancel).await.unwrap();
        let err = repository.insert("alice", &record, &cancel).await.unwrap_err();

        assert!(matches!(err, RecordError::Persistence(_)));
    }

    #[tokio::test]
    async fn update_of_absent_id_is_not_found() {
        let repository = repository();
        let cancel = CancellationToken::new();
        let id = Uuid::new_v4();

        let details = ExpenseDetails {
            value: 5.0,
            date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            reason: "r".to_string(),
            category: Some(Category::Others),
        };
        let err = repository
            .update("alice", id, &details, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, RecordError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn update_overwrites_details_and_keeps_identity() {
        let repository = repository();
        let cancel = CancellationToken::new();
        let record = record(15, Category::Sport);
        repository.insert("alice", &record, &cancel).await.unwrap();

        let incoming = ExpenseDetails {
            value: 99.0,
            date: Some(Utc.with_ymd_and_hms(2024, 2, 2, 2, 0, 0).unwrap()),
            reason: "updated".to_string(),
            category: Some(Category::Pets),
        };
        let updated = repository
            .update("alice", record.id, &incoming, &cancel)
            .await
            .unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.details, incoming);

        let fetched = repository.get("alice", record.id, &cancel).await.unwrap();
        assert_eq!(fetched, Some(updated));
    }

    #[tokio::test]
    async fn delete_removes_and_absent_delete_is_not_found() {
        let repository = repository();
        let cancel = CancellationToken::new();
        let record = record(15, Category::Sport);
        repository.insert("alice", &record, &cancel).await.unwrap();

        repository.delete("alice", record.id, &cancel).await.unwrap();
        assert_eq!(
            repository.get("alice", record.id, &cancel).await.unwrap(),
            None
        );

        let err = repository
            .delete("alice", record.id, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_all_applies_the_filter() {
        let repository = repository();
        let cancel = CancellationToken::new();

        repository
            .insert("alice", &record(5, Category::Sport), &cancel)
            .await
            .unwrap();
        repository
            .insert("alice", &record(20, Category::Pets), &cancel)
            .await
            .unwrap();

        let filter = Filter::default().with_category(Category::Pets);
        let listed = repository.get_all("alice", &filter, &cancel).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].details.category, Some(Category::Pets));
    }

    #[tokio::test]
    async fn cancelled_token_surfaces_as_cancelled() {
        let repository = repository();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = repository
            .get_all("alice", &Filter::default(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::Cancelled));
    }
}

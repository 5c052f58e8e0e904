use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Record, RecordDetails};
use crate::repository::{FilterFactory, FilterParameters, RecordRepository};
use crate::services::clock::Clock;
use crate::utils::RecordError;

/// Business rules in front of the repository: value validation before any
/// store call, id assignment and date/category defaulting on insert. All
/// not-found, conflict and cancellation signals pass through unchanged.
pub struct Registry<D> {
    repository: RecordRepository<D>,
    clock: Arc<dyn Clock>,
}

impl<D: RecordDetails> Registry<D> {
    pub fn new(repository: RecordRepository<D>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn get_all(
        &self,
        tenant: &str,
        parameters: Option<&FilterParameters>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Record<D>>, RecordError> {
        debug!(kind = D::KIND, tenant, "get_all invoked");

        let filter = FilterFactory::create(parameters);
        let records = self.repository.get_all(tenant, &filter, cancel).await?;

        debug!(kind = D::KIND, tenant, count = records.len(), "get_all completed");
        Ok(records)
    }

    pub async fn get(
        &self,
        tenant: &str,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Option<Record<D>>, RecordError> {
        debug!(kind = D::KIND, tenant, id = %id, "get invoked");
        self.repository.get(tenant, id, cancel).await
    }

    pub async fn insert(
        &self,
        tenant: &str,
        details: D,
        cancel: &CancellationToken,
    ) -> Result<Record<D>, RecordError> {
        debug!(kind = D::KIND, tenant, "insert invoked");
        validate(&details)?;

        let record = Record {
            id: Uuid::new_v4(),
            details: details.with_defaults(self.clock.now()),
        };
        self.repository.insert(tenant, &record, cancel).await?;

        debug!(kind = D::KIND, tenant, id = %record.id, "insert completed");
        Ok(record)
    }

    pub async fn update(
        &self,
        tenant: &str,
        id: Uuid,
        details: D,
        cancel: &CancellationToken,
    ) -> Result<Record<D>, RecordError> {
        debug!(kind = D::KIND, tenant, id = %id, "update invoked");
        validate(&details)?;

        // The mapper needs a concrete date; an update without one gets the
        // same defaulting as an insert.
        let details = details.with_defaults(self.clock.now());
        self.repository.update(tenant, id, &details, cancel).await
    }

    pub async fn delete(
        &self,
        tenant: &str,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), RecordError> {
        debug!(kind = D::KIND, tenant, id = %id, "delete invoked");
        self.repository.delete(tenant, id, cancel).await
    }
}

fn validate<D: RecordDetails>(details: &D) -> Result<(), RecordError> {
    if details.value() < 0.0 {
        return Err(RecordError::InvalidArgument(
            "value must be non-negative".to_string(),
        ));
    }
    Ok(())
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Category, Record, RecordDetails};
use crate::utils::RecordError;

/// Fixed zero-padded serialization of record dates. Lexicographic comparison
/// of two dates in this form orders them chronologically, which is what the
/// filter relies on.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Persisted form of a record. The document-level `id` mirrors the tenant as
/// a wire-compatibility detail; identity lives in `guid` and uniqueness on
/// the (tenant, guid) partition key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntity {
    pub id: String,
    pub username: String,
    pub guid: String,
    pub value: f64,
    pub date: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
}

/// Map a record into its persisted entity. The date must already be set; the
/// registry defaults it before every insert and update.
pub fn to_entity<D: RecordDetails>(
    tenant: &str,
    record: &Record<D>,
) -> Result<RecordEntity, RecordError> {
    let date = record.details.date().ok_or_else(|| {
        RecordError::InvalidArgument("record date must be set before persisting".to_string())
    })?;

    Ok(RecordEntity {
        id: tenant.to_string(),
        username: tenant.to_string(),
        guid: record.id.to_string(),
        value: record.details.value(),
        date: date.format(DATE_FORMAT).to_string(),
        reason: record.details.reason().to_string(),
        category: record.details.category().map(Category::code),
    })
}

/// Map a persisted entity back into a record. Unknown category codes collapse
/// to `Others`; a malformed guid or date is a persistence failure, not silent
/// data loss.
pub fn to_record<D: RecordDetails>(entity: &RecordEntity) -> Result<Record<D>, RecordError> {
    let id = Uuid::parse_str(&entity.guid).map_err(|e| {
        RecordError::Persistence(format!("malformed record guid '{}': {e}", entity.guid))
    })?;

    let date = NaiveDateTime::parse_from_str(&entity.date, DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            RecordError::Persistence(format!("malformed record date '{}': {e}", entity.date))
        })?;

    let details = D::from_parts(
        entity.value,
        date,
        entity.reason.clone(),
        entity.category.map(Category::from_code),
    );

    Ok(Record { id, details })
}

/// Overwrite the mutable fields of an existing entity from incoming details.
/// Identity fields (`id`, `username`, `guid`) are never touched.
pub fn apply_details<D: RecordDetails>(
    entity: &mut RecordEntity,
    details: &D,
) -> Result<(), RecordError> {
    let date = details.date().ok_or_else(|| {
        RecordError::InvalidArgument("record date must be set before persisting".to_string())
    })?;

    entity.value = details.value();
    entity.reason = details.reason().to_string();
    entity.date = date.format(DATE_FORMAT).to_string();
    entity.category = details.category().map(Category::code);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDetails, IncomeDetails};
    use chrono::{TimeZone, Utc};

    fn expense() -> Record<ExpenseDetails> {
        Record {
            id: Uuid::new_v4(),
            details: ExpenseDetails {
                value: 42.5,
                date: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
                reason: "groceries".to_string(),
                category: Some(Category::HousingAndSupplies),
            },
        }
    }

    #[test]
    fn expense_round_trip_is_lossless() {
        let record = expense();
        let entity = to_entity("alice", &record).unwrap();

        assert_eq!(entity.id, "alice");
        assert_eq!(entity.username, "alice");
        assert_eq!(entity.guid, record.id.to_string());
        assert_eq!(entity.date, "2024-01-15T10:30:00Z");
        assert_eq!(entity.category, Some(1));

        let back: Record<ExpenseDetails> = to_record(&entity).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn date_truncates_to_second_precision() {
        let mut record = expense();
        record.details.date = Some(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
                + chrono::Duration::milliseconds(750),
        );

        let entity = to_entity("alice", &record).unwrap();
        assert_eq!(entity.date, "2024-01-15T10:30:00Z");
    }

    #[test]
    fn unknown_category_code_collapses_to_others() {
        let record = expense();
        let mut entity = to_entity("alice", &record).unwrap();
        entity.category = Some(99);

        let back: Record<ExpenseDetails> = to_record(&entity).unwrap();
        assert_eq!(back.details.category, Some(Category::Others));

        // and the lossy collapse survives the trip back out
        let entity_again = to_entity("alice", &back).unwrap();
        assert_eq!(entity_again.category, Some(0));
    }

    #[test]
    fn unset_date_is_rejected() {
        let mut record = expense();
        record.details.date = None;

        let err = to_entity("alice", &record).unwrap_err();
        assert!(matches!(err, RecordError::InvalidArgument(_)));
    }

    #[test]
    fn income_entity_carries_no_category() {
        let record = Record {
            id: Uuid::new_v4(),
            details: IncomeDetails {
                value: 1000.0,
                date: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
                reason: "salary".to_string(),
            },
        };

        let entity = to_entity("bob", &record).unwrap();
        assert_eq!(entity.category, None);

        let json = serde_json::to_value(&entity).unwrap();
        assert!(json.get("category").is_none());
    }

    #[test]
    fn malformed_stored_fields_surface_as_persistence_errors() {
        let mut entity = to_entity("alice", &expense()).unwrap();
        entity.date = "15/01/2024".to_string();
        let err = to_record::<ExpenseDetails>(&entity).unwrap_err();
        assert!(matches!(err, RecordError::Persistence(_)));

        let mut entity = to_entity("alice", &expense()).unwrap();
        entity.guid = "not-a-guid".to_string();
        let err = to_record::<ExpenseDetails>(&entity).unwrap_err();
        assert!(matches!(err, RecordError::Persistence(_)));
    }

    #[test]
    fn update_leaves_identity_fields_alone() {
        let record = expense();
        let mut entity = to_entity("alice", &record).unwrap();

        let incoming = ExpenseDetails {
            value: 7.0,
            date: Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()),
            reason: "cinema".to_string(),
            category: Some(Category::Entertainment),
        };
        apply_details(&mut entity, &incoming).unwrap();

        assert_eq!(entity.id, "alice");
        assert_eq!(entity.username, "alice");
        assert_eq!(entity.guid, record.id.to_string());
        assert_eq!(entity.value, 7.0);
        assert_eq!(entity.reason, "cinema");
        assert_eq!(entity.date, "2024-06-01T08:00:00Z");
        assert_eq!(entity.category, Some(Category::Entertainment.code()));
    }
}

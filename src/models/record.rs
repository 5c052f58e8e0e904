use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Category;

/// Capability of one record kind. Expenses and incomes share the whole
/// registry/repository stack; the only differences (category, defaulting)
/// live behind this trait.
pub trait RecordDetails:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const KIND: &'static str;

    fn value(&self) -> f64;
    fn reason(&self) -> &str;
    fn date(&self) -> Option<DateTime<Utc>>;

    fn category(&self) -> Option<Category> {
        None
    }

    /// Fill unset fields before persistence: the date falls back to `now`,
    /// the category (where the kind has one) to `Others`.
    fn with_defaults(self, now: DateTime<Utc>) -> Self;

    /// Rebuild details from the persisted field set. Total: kinds without a
    /// category simply ignore it.
    fn from_parts(
        value: f64,
        date: DateTime<Utc>,
        reason: String,
        category: Option<Category>,
    ) -> Self;
}

/// A domain record owned by a tenant. The id is assigned at creation and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<D> {
    pub id: Uuid,
    pub details: D,
}

pub type Expense = Record<ExpenseDetails>;
pub type Income = Record<IncomeDetails>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDetails {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl RecordDetails for ExpenseDetails {
    const KIND: &'static str = "expense";

    fn value(&self) -> f64 {
        self.value
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn category(&self) -> Option<Category> {
        self.category
    }

    fn with_defaults(self, now: DateTime<Utc>) -> Self {
        Self {
            date: self.date.or(Some(now)),
            category: self.category.or(Some(Category::Others)),
            ..self
        }
    }

    fn from_parts(
        value: f64,
        date: DateTime<Utc>,
        reason: String,
        category: Option<Category>,
    ) -> Self {
        Self {
            value,
            date: Some(date),
            reason,
            category: Some(category.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeDetails {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub reason: String,
}

impl RecordDetails for IncomeDetails {
    const KIND: &'static str = "income";

    fn value(&self) -> f64 {
        self.value
    }

    fn reason(&self) -> &str {
        &self.reason
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn with_defaults(self, now: DateTime<Utc>) -> Self {
        Self {
            date: self.date.or(Some(now)),
            ..self
        }
    }

    fn from_parts(
        value: f64,
        date: DateTime<Utc>,
        reason: String,
        _category: Option<Category>,
    ) -> Self {
        Self {
            value,
            date: Some(date),
            reason,
        }
    }
}

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::models::Category;
use crate::repository::FilterParameters;
use crate::utils::RecordError;

/// List query parameters for expenses. `in` narrows to a year or year-month
/// prefix; `category` is an expense-only filter.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "in")]
    pub within: Option<String>,
    pub category: Option<Category>,
}

/// List query parameters for incomes: the same date filters, no category.
#[derive(Debug, Default, Deserialize)]
pub struct IncomesQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "in")]
    pub within: Option<String>,
}

pub fn validate_expenses(query: &ExpensesQuery) -> Result<FilterParameters, RecordError> {
    validate_dates(&[&query.from, &query.to, &query.within])?;

    Ok(FilterParameters {
        from: query.from.clone(),
        to: query.to.clone(),
        within: query.within.clone(),
        category: query.category,
    })
}

pub fn validate_incomes(query: &IncomesQuery) -> Result<FilterParameters, RecordError> {
    validate_dates(&[&query.from, &query.to, &query.within])?;

    Ok(FilterParameters {
        from: query.from.clone(),
        to: query.to.clone(),
        within: query.within.clone(),
        category: None,
    })
}

// Zero-padded shapes only: anything looser would break the lexicographic
// date comparison downstream.
static FILTER_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").expect("valid filter date pattern"));

fn validate_dates(values: &[&Option<String>]) -> Result<(), RecordError> {
    for value in values.iter().filter_map(|v| v.as_deref()) {
        validate_date(value)?;
    }
    Ok(())
}

fn validate_date(value: &str) -> Result<(), RecordError> {
    let invalid = || {
        RecordError::InvalidArgument(format!(
            "invalid filter date '{value}', expected yyyy, yyyy-MM or yyyy-MM-dd"
        ))
    };

    if !FILTER_DATE.is_match(value) {
        return Err(invalid());
    }

    match value.len() {
        4 => Ok(()),
        7 => {
            let month: u32 = value[5..].parse().map_err(|_| invalid())?;
            if (1..=12).contains(&month) {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| invalid()),
    }
}

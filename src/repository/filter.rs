use crate::models::Category;
use crate::repository::entity::RecordEntity;

/// Immutable predicate configuration for a list query. Built once by the
/// filter factory and passed by value; applying it never mutates it, so one
/// filter can serve a whole query without reset bookkeeping.
///
/// Date bounds are lexicographic string comparisons, correct only because
/// entity dates are always serialized in the fixed zero-padded form. The
/// factory sets at most one of `from` and `between`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    from: Option<String>,
    within: Option<String>,
    between: Option<(String, String)>,
    category: Option<Category>,
}

impl Filter {
    /// Inclusive lower date bound.
    pub fn from_date(mut self, start: impl Into<String>) -> Self {
        self.from = Some(start.into());
        self
    }

    /// Date-prefix match, e.g. a year or year-month.
    pub fn within(mut self, prefix: impl Into<String>) -> Self {
        self.within = Some(prefix.into());
        self
    }

    /// Inclusive two-sided date bound.
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.between = Some((start.into(), end.into()));
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Filter::default()
    }

    /// Run the configured predicates as successive narrowing passes, in fixed
    /// order: from/between, then prefix, then category. With nothing set the
    /// input comes back unchanged.
    pub fn apply(&self, mut items: Vec<RecordEntity>) -> Vec<RecordEntity> {
        if let Some(from) = &self.from {
            items.retain(|item| item.date.as_str() >= from.as_str());
        }

        if let Some((start, end)) = &self.between {
            items.retain(|item| {
                item.date.as_str() >= start.as_str() && item.date.as_str() <= end.as_str()
            });
        }

        if let Some(prefix) = &self.within {
            items.retain(|item| item.date.starts_with(prefix.as_str()));
        }

        if let Some(category) = self.category {
            let code = category.code();
            items.retain(|item| item.category == Some(code));
        }

        items
    }
}

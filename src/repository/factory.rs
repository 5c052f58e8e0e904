use crate::models::Category;
use crate::repository::filter::Filter;

/// Validated filter inputs, as handed over by the query layer. Dates are
/// already checked against the accepted `yyyy[-MM[-dd]]` shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParameters {
    pub from: Option<String>,
    pub to: Option<String>,
    /// The `in` query parameter: a year or year-month prefix.
    pub within: Option<String>,
    pub category: Option<Category>,
}

pub struct FilterFactory;

impl FilterFactory {
    /// Translate parameters into a filter. `None` yields the pass-through
    /// filter. `from`+`to` become a two-sided bound, `from` alone a lower
    /// bound; `within` is added independently and may coexist with either.
    pub fn create(parameters: Option<&FilterParameters>) -> Filter {
        let Some(parameters) = parameters else {
            return Filter::default();
        };

        let mut filter = Filter::default();

        if let Some(category) = parameters.category {
            filter = filter.with_category(category);
        }

        if let Some(from) = nonblank(&parameters.from) {
            filter = match nonblank(&parameters.to) {
                Some(to) => filter.between(from, to),
                None => filter.from_date(from),
            };
        }

        if let Some(within) = nonblank(&parameters.within) {
            filter = filter.within(within);
        }

        filter
    }
}

fn nonblank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_parameters_yield_the_pass_through_filter() {
        assert!(FilterFactory::create(None).is_empty());
        assert!(FilterFactory::create(Some(&FilterParameters::default())).is_empty());
    }

    #[test]
    fn from_and_to_become_a_between_bound() {
        let parameters = FilterParameters {
            from: Some("2024-01-01".to_string()),
            to: Some("2024-01-31".to_string()),
            ..Default::default()
        };

        let filter = FilterFactory::create(Some(&parameters));
        assert_eq!(
            filter,
            Filter::default().between("2024-01-01", "2024-01-31")
        );
    }

    #[test]
    fn from_alone_becomes_a_lower_bound() {
        let parameters = FilterParameters {
            from: Some("2024-01-01".to_string()),
            ..Default::default()
        };

        let filter = FilterFactory::create(Some(&parameters));
        assert_eq!(filter, Filter::default().from_date("2024-01-01"));
    }

    #[test]
    fn within_is_added_independently_of_the_range() {
        let parameters = FilterParameters {
            from: Some("2024-01-01".to_string()),
            to: Some("2024-06-30".to_string()),
            within: Some("2024-03".to_string()),
            category: Some(Category::Sport),
        };

        let filter = FilterFactory::create(Some(&parameters));
        assert_eq!(
            filter,
            Filter::default()
                .with_category(Category::Sport)
                .between("2024-01-01", "2024-06-30")
                .within("2024-03")
        );
    }

    #[test]
    fn blank_strings_are_ignored() {
        let parameters = FilterParameters {
            from: Some("  ".to_string()),
            to: Some(String::new()),
            within: Some("2024".to_string()),
            category: None,
        };

        let filter = FilterFactory::create(Some(&parameters));
        assert_eq!(filter, Filter::default().within("2024"));
    }
}

use serde::Serialize;

use super::calendar::{format_for_date_operator, month_label, shift_month, Calendar, DateParser};
use crate::errors::{QueryError, QueryResult};

/// Months covered by a default historical sweep.
pub const DEFAULT_VARIATION_COUNT: usize = 12;

/// Longest sweep accepted, a century of months.
pub const MAX_VARIATION_COUNT: usize = 1200;

const DATE_OPERATORS: [&str; 2] = ["before:", "after:"];

/// A copy of a query bounded to a single month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    pub label: String,
    pub query: String,
}

/// Month-by-month copies of `query`, most recent first.
///
/// The sweep starts at the month before the first date found in the query
/// (today when there is none). Each variation's `before` bound equals the
/// previous variation's `after` bound. Counts above
/// [`MAX_VARIATION_COUNT`] are rejected.
pub fn get_variations_with<P: DateParser>(
    query: &str,
    calendar: &Calendar<P>,
    count: usize,
) -> QueryResult<Vec<Variation>> {
    if count > MAX_VARIATION_COUNT {
        return Err(QueryError::VariationCount {
            count,
            max: MAX_VARIATION_COUNT,
        });
    }

    let mut month = shift_month(calendar.resolve(Some(query)), 0)?;
    let base = strip_date_operators(query);

    let mut variations = Vec::new();
    for _ in 0..count {
        let after = shift_month(month, -1)?;

        let query = set_operator(&base, "before", &format_for_date_operator(month));
        let query = set_operator(&query, "after", &format_for_date_operator(after));

        variations.push(Variation {
            label: month_label(after),
            query,
        });
        month = after;
    }

    Ok(variations)
}

/// Drop every `before:`/`after:` token.
pub fn strip_date_operators(query: &str) -> String {
    query
        .split_whitespace()
        .filter(|token| !DATE_OPERATORS.iter().any(|op| token.starts_with(op)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace the value of the first `key:` token, or append `key:value`.
pub fn set_operator(query: &str, key: &str, value: &str) -> String {
    let needle = format!("{key}:");
    let existing = query
        .match_indices(&needle)
        .map(|(idx, _)| idx)
        .find(|&idx| idx == 0 || query[..idx].ends_with(char::is_whitespace));

    match existing {
        Some(idx) => {
            let value_start = idx + needle.len();
            let value_end = query[value_start..]
                .find(char::is_whitespace)
                .map_or(query.len(), |offset| value_start + offset);
            format!("{}{}{}", &query[..value_start], value, &query[value_end..])
        }
        None if query.trim().is_empty() => format!("{needle}{value}"),
        None => format!("{} {needle}{value}", query.trim_end()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn pinned() -> Calendar {
        Calendar::new().pinned_to(NaiveDate::from_ymd_opt(2024, 7, 20).unwrap())
    }

    #[test]
    fn test_oversized_count_is_rejected() {
        for count in [MAX_VARIATION_COUNT + 1, 1_000_000_000, usize::MAX] {
            assert!(matches!(
                get_variations_with("rust", &pinned(), count),
                Err(QueryError::VariationCount { max: MAX_VARIATION_COUNT, .. })
            ));
        }
    }

    #[test]
    fn test_max_count_is_accepted() {
        let variations = get_variations_with("rust", &pinned(), MAX_VARIATION_COUNT).unwrap();
        assert_eq!(variations.len(), MAX_VARIATION_COUNT);
        assert_eq!(variations[MAX_VARIATION_COUNT - 1].label, "July, 1924");
    }

    #[test]
    fn test_set_operator_appends() {
        assert_eq!(set_operator("remote", "after", "2023-01-01"), "remote after:2023-01-01");
        assert_eq!(set_operator("", "after", "2023-01-01"), "after:2023-01-01");
    }

    #[test]
    fn test_set_operator_replaces_first() {
        assert_eq!(
            set_operator("remote after:2022-01-01 site:lever.co", "after", "2023-01-01"),
            "remote after:2023-01-01 site:lever.co"
        );
        assert_eq!(
            set_operator("after:1 after:2", "after", "3"),
            "after:3 after:2"
        );
    }

    #[test]
    fn test_set_operator_requires_token_start() {
        assert_eq!(
            set_operator("site:xafter:1", "after", "2"),
            "site:xafter:1 after:2"
        );
    }

    #[test]
    fn test_strip_date_operators() {
        assert_eq!(
            strip_date_operators("remote  before:2023-02-01 marketing after:2023-01-01"),
            "remote marketing"
        );
    }
}

//! Job search query DSL.
//!
//! Queries are whitespace-delimited tokens:
//!
//! - free text: any token without `:` or `..`
//! - `site:<domain>`
//! - `after:<YYYY-MM-01>`, `before:<YYYY-MM-01>`
//! - `<min>..<max>` or `<min>..` salary ranges
//! - `(`, `)`, `OR`, `AND`: grouping, dropped on parse
//!
//! Everything here is pure. The only outside input is the date resolver,
//! injected through [`Calendar`].

mod calendar;
mod engine;
mod fingerprint;
mod form;
mod parser;
mod part;
mod search_url;
mod serializer;
mod shape;
mod variations;

pub use calendar::{
    format_for_date_operator, month_label, parse_last_month_date, shift_month, Calendar,
    DateParser, NaturalDateParser,
};
pub use engine::QueryEngine;
pub use fingerprint::{query_fingerprint, FINGERPRINT_NAMESPACE};
pub use form::{parts_from_json, RawPart};
pub use parser::parse_query;
pub use part::{QueryPart, SalaryRange, CANONICAL_ORDER_VERSION, SALARY_MAX_CEILING};
pub use search_url::{make_google_search_url, make_search_url, GOOGLE_SEARCH_URL};
pub use serializer::{build_query_with, default_site_group, HR_SITES};
pub use shape::{get_query_parts, QueryShape};
pub use variations::{
    get_variations_with, set_operator, strip_date_operators, Variation, DEFAULT_VARIATION_COUNT,
    MAX_VARIATION_COUNT,
};

use crate::errors::QueryResult;

/// Serialize parts, resolving `last-month` against the real clock.
pub fn build_query(parts: &[QueryPart]) -> QueryResult<String> {
    build_query_with(parts, &Calendar::new())
}

/// Twelve month-bounded copies of `query`, most recent first.
pub fn get_variations(query: &str) -> QueryResult<Vec<Variation>> {
    get_variations_with(query, &Calendar::new(), DEFAULT_VARIATION_COUNT)
}

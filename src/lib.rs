//! Structured job search queries: build, parse, and sweep them across months.

pub mod config;
pub mod errors;
pub mod query;

pub use errors::{QueryError, QueryResult};
pub use query::{
    build_query, get_query_parts, get_variations, make_google_search_url, parse_query,
    QueryEngine, QueryPart, QueryShape, SalaryRange, Variation,
};

#[cfg(test)]
mod tests;

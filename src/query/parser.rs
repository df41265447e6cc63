use super::part::QueryPart;
use crate::errors::QueryResult;

/// Parse a query string into parts in canonical order.
///
/// Structural tokens (`(`, `)`, `OR`, `AND`) are dropped, so an injected
/// default site group comes back as plain `site` parts.
pub fn parse_query(query: &str) -> QueryResult<Vec<QueryPart>> {
    let mut parts = Vec::new();
    for token in query.split_whitespace() {
        if let Some(part) = QueryPart::decode(token)? {
            parts.push(part);
        }
    }

    // sort_by is stable, equal canonical keys keep their input order
    parts.sort_by(QueryPart::canonical_cmp);

    log::debug!("parsed {} parts from {query:?}", parts.len());
    Ok(parts)
}

use serde::Serialize;

use super::parser::parse_query;
use super::part::QueryPart;
use crate::errors::{QueryError, QueryResult};

/// Flat summary of a query for filling a search form back in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryShape {
    pub terms: String,
    pub salary: Vec<u64>,
    pub sites: Vec<String>,
}

pub fn get_query_parts(query: &str) -> QueryResult<QueryShape> {
    let mut terms = Vec::new();
    let mut shape = QueryShape::default();

    for part in parse_query(query)? {
        match part {
            QueryPart::Text(text) if !text.is_empty() => terms.push(text),
            QueryPart::Site(site) if !site.is_empty() => shape.sites.push(site),
            QueryPart::Salary(range) => {
                let min = range.min.ok_or_else(|| {
                    QueryError::invalid_input("salary", "range must start with a number")
                })?;
                shape.salary.push(min);
                shape.salary.extend(range.max);
            }
            // date bounds are not part of the form
            _ => {}
        }
    }

    shape.terms = terms.join(" ");
    Ok(shape)
}

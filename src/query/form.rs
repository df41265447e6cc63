//! Untyped parts as a search form submits them, `{ "type": ..., "input": ... }`.
//!
//! This is the boundary where loosely typed input becomes a [`QueryPart`]:
//! wrong input types and unknown part types are rejected here, never coerced.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::part::{QueryPart, SalaryRange};
use crate::errors::{QueryError, QueryResult};

#[derive(Debug, Clone, Deserialize)]
pub struct RawPart {
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(default)]
    pub input: Option<Value>,
}

impl TryFrom<RawPart> for QueryPart {
    type Error = QueryError;

    fn try_from(raw: RawPart) -> QueryResult<Self> {
        let RawPart { part_type, input } = raw;

        match part_type.as_str() {
            "text" => required_string("text", input).map(QueryPart::Text),
            "site" => required_string("site", input).map(QueryPart::Site),
            "after" => required_string("after", input).map(QueryPart::After),
            "before" => required_string("before", input).map(QueryPart::Before),
            "last-month" => optional_string("last-month", input).map(QueryPart::LastMonth),
            "salary" => salary(input).map(QueryPart::Salary),
            _ => Err(QueryError::unknown_part_type(part_type)),
        }
    }
}

impl<'de> Deserialize<'de> for QueryPart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPart::deserialize(deserializer)?;
        QueryPart::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a JSON array of form parts.
pub fn parts_from_json(json: &str) -> QueryResult<Vec<QueryPart>> {
    let raw: Vec<RawPart> = serde_json::from_str(json)?;
    raw.into_iter().map(QueryPart::try_from).collect()
}

fn required_string(part: &str, input: Option<Value>) -> QueryResult<String> {
    match input {
        Some(Value::String(value)) if !value.is_empty() => Ok(value),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            Err(QueryError::invalid_input(part, "input is required"))
        }
        Some(other) => Err(QueryError::invalid_input(
            part,
            format!("expected a string, got {}", value_kind(&other)),
        )),
    }
}

/// Falsy input means "now" for date sugar.
fn optional_string(part: &str, input: Option<Value>) -> QueryResult<Option<String>> {
    match input {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value).filter(|v| !v.is_empty())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(other) => Err(QueryError::invalid_input(
            part,
            format!("expected a string, got {}", value_kind(&other)),
        )),
    }
}

fn salary(input: Option<Value>) -> QueryResult<SalaryRange> {
    let values = match input {
        Some(Value::Array(values)) => values,
        None | Some(Value::Null) => {
            return Err(QueryError::invalid_input("salary", "input is required"))
        }
        Some(other) => {
            return Err(QueryError::invalid_input(
                "salary",
                format!("expected an array, got {}", value_kind(&other)),
            ))
        }
    };

    if values.is_empty() || values.len() > 2 {
        return Err(QueryError::invalid_input(
            "salary",
            "expected [min] or [min, max]",
        ));
    }

    let min = bound(&values[0])?;
    let max = values.get(1).map(bound).transpose()?.flatten();

    Ok(SalaryRange { min, max })
}

fn bound(value: &Value) -> QueryResult<Option<u64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_u64().map(Some).ok_or_else(|| {
            QueryError::invalid_input("salary", format!("{n} is not a whole positive number"))
        }),
        other => Err(QueryError::invalid_input(
            "salary",
            format!("expected a number, got {}", value_kind(other)),
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use super::calendar::{format_for_date_operator, Calendar, DateParser};
use crate::errors::{QueryError, QueryResult};

/// Highest salary bound we emit. Larger numbers start matching unrelated
/// figures in result pages (headcounts, funding rounds, zip codes).
pub const SALARY_MAX_CEILING: u64 = 900_000;

/// Version of the canonical part ordering.
///
/// Stored query identifiers are derived from this ordering. Never change
/// [`QueryPart::canonical_cmp`] in place: ship a new version together with a
/// new fingerprint namespace.
pub const CANONICAL_ORDER_VERSION: u32 = 1;

const SALARY_SEPARATOR: &str = "..";

/// Grouping tokens that carry no value of their own.
const STRUCTURAL_TOKENS: [&str; 4] = ["(", ")", "OR", "AND"];

/// Salary bounds written `<min>..<max>` or `<min>..`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalaryRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl SalaryRange {
    pub fn at_least(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn encode(&self) -> QueryResult<String> {
        let min = self
            .min
            .ok_or_else(|| QueryError::invalid_input("salary", "input must start with a number"))?;

        match self.max {
            Some(max) if max > SALARY_MAX_CEILING => Err(QueryError::SalaryCeiling {
                max,
                ceiling: SALARY_MAX_CEILING,
            }),
            Some(max) => Ok(format!("{min}{SALARY_SEPARATOR}{max}")),
            None => Ok(format!("{min}{SALARY_SEPARATOR}")),
        }
    }

    /// Decoding accepts any numeric bounds, the ceiling is only enforced on encode.
    fn decode(token: &str) -> QueryResult<Self> {
        let (min, max) = token
            .split_once(SALARY_SEPARATOR)
            .ok_or_else(|| QueryError::invalid_salary(token))?;

        let side = |raw: &str| -> QueryResult<Option<u64>> {
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|_| QueryError::invalid_salary(token))
        };

        Ok(Self {
            min: side(min)?,
            max: side(max)?,
        })
    }
}

/// Serialized as `[min]` or `[min, max]`.
impl Serialize for SalaryRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.max {
            Some(max) => serializer.collect_seq([self.min, Some(max)]),
            None => serializer.collect_seq([self.min]),
        }
    }
}

/// One semantic unit of a job search query.
///
/// `LastMonth` only exists on the build side: it always lowers to an
/// `after:` bound, so parsing never yields it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "input", rename_all = "kebab-case")]
pub enum QueryPart {
    Text(String),
    Site(String),
    LastMonth(Option<String>),
    After(String),
    Before(String),
    Salary(SalaryRange),
}

impl QueryPart {
    pub fn text(input: impl Into<String>) -> Self {
        Self::Text(input.into())
    }

    pub fn site(input: impl Into<String>) -> Self {
        Self::Site(input.into())
    }

    pub fn last_month(input: Option<&str>) -> Self {
        Self::LastMonth(input.map(str::to_string))
    }

    /// Wire name of the part type.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryPart::Text(_) => "text",
            QueryPart::Site(_) => "site",
            QueryPart::LastMonth(_) => "last-month",
            QueryPart::After(_) => "after",
            QueryPart::Before(_) => "before",
            QueryPart::Salary(_) => "salary",
        }
    }

    /// Encode against the real clock.
    pub fn encode(&self) -> QueryResult<String> {
        self.encode_with(&Calendar::new())
    }

    pub fn encode_with<P: DateParser>(&self, calendar: &Calendar<P>) -> QueryResult<String> {
        match self {
            QueryPart::Text(input) => {
                if input.trim().is_empty() {
                    return Err(QueryError::invalid_input(
                        "text",
                        "input must be a non-empty string",
                    ));
                }
                Ok(input.clone())
            }
            QueryPart::Site(input) => operator("site", input),
            QueryPart::LastMonth(input) => {
                let month = calendar.last_month(input.as_deref())?;
                Ok(format!("after:{}", format_for_date_operator(month)))
            }
            QueryPart::After(input) => operator("after", input),
            QueryPart::Before(input) => operator("before", input),
            QueryPart::Salary(range) => range.encode(),
        }
    }

    /// Decode one whitespace-free token. Structural tokens yield `None`.
    pub fn decode(token: &str) -> QueryResult<Option<Self>> {
        if token.is_empty() || STRUCTURAL_TOKENS.contains(&token) {
            return Ok(None);
        }

        if token.contains(SALARY_SEPARATOR) {
            return SalaryRange::decode(token).map(|range| Some(QueryPart::Salary(range)));
        }

        let Some((op, value)) = token.split_once(':') else {
            return Ok(Some(QueryPart::Text(token.to_string())));
        };

        let part = match op {
            "after" => QueryPart::After(value.to_string()),
            "before" => QueryPart::Before(value.to_string()),
            "site" => QueryPart::Site(value.to_string()),
            _ => return Err(QueryError::unknown_query_part(token)),
        };

        Ok(Some(part))
    }

    /// Canonical order: text, then salary, then colon operators by value.
    ///
    /// Frozen at [`CANONICAL_ORDER_VERSION`]. Equal keys compare `Equal` so a
    /// stable sort keeps their input order.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.canonical_key().cmp(&other.canonical_key())
    }

    fn canonical_key(&self) -> (u8, &str) {
        match self {
            QueryPart::Text(_) => (0, ""),
            QueryPart::Salary(_) => (1, ""),
            QueryPart::Site(value) | QueryPart::After(value) | QueryPart::Before(value) => {
                (2, value.as_str())
            }
            QueryPart::LastMonth(value) => (2, value.as_deref().unwrap_or_default()),
        }
    }
}

fn operator(key: &str, value: &str) -> QueryResult<String> {
    if value.is_empty() {
        return Err(QueryError::invalid_input(key, "input must be a non-empty string"));
    }
    if value.contains(char::is_whitespace) {
        return Err(QueryError::invalid_input(key, "input must not contain whitespace"));
    }
    Ok(format!("{key}:{value}"))
}

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while encoding, decoding or deriving queries
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input for {part} part: {message}")]
    InvalidInput { part: String, message: String },

    #[error("Salary max {max} exceeds {ceiling}, larger numbers match unrelated figures in results")]
    SalaryCeiling { max: u64, ceiling: u64 },

    #[error("Unknown part type: {part_type}")]
    UnknownPartType { part_type: String },

    #[error("Unknown query part: {token}")]
    UnknownQueryPart { token: String },

    #[error("Invalid salary range: {token}")]
    InvalidSalary { token: String },

    #[error("Shifting {date} by {months} months leaves the supported calendar")]
    DateOutOfRange { date: NaiveDate, months: i32 },

    #[error("Variation count {count} exceeds {max}")]
    VariationCount { count: usize, max: usize },

    #[error("Invalid search url: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryError {
    /// Create an invalid input error
    pub fn invalid_input(part: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            part: part.into(),
            message: message.into(),
        }
    }

    /// Create an unknown part type error
    pub fn unknown_part_type(part_type: impl Into<String>) -> Self {
        Self::UnknownPartType {
            part_type: part_type.into(),
        }
    }

    /// Create an unknown query part error
    pub fn unknown_query_part(token: impl Into<String>) -> Self {
        Self::UnknownQueryPart {
            token: token.into(),
        }
    }

    /// Create an invalid salary error
    pub fn invalid_salary(token: impl Into<String>) -> Self {
        Self::InvalidSalary {
            token: token.into(),
        }
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

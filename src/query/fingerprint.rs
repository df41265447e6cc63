use uuid::Uuid;

use super::parser::parse_query;
use crate::errors::QueryResult;

/// Namespace of identifiers derived under canonical order version 1.
/// Changing it orphans every identifier handed out so far.
pub const FINGERPRINT_NAMESPACE: Uuid = Uuid::from_u128(0x1a3cbda5_7c19_408d_ac04_9d0559a6cc28);

/// Stable identifier of a query's content.
///
/// Queries that parse to the same canonical parts share an identifier, no
/// matter how their tokens were ordered or grouped.
pub fn query_fingerprint(query: &str) -> QueryResult<Uuid> {
    let parts = parse_query(query)?;
    let json = serde_json::to_string(&parts)?;
    Ok(Uuid::new_v5(&FINGERPRINT_NAMESPACE, json.as_bytes()))
}

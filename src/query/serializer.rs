use super::calendar::{Calendar, DateParser};
use super::part::QueryPart;
use crate::errors::QueryResult;

/// Applicant tracking systems whose postings we search by default.
/// Order is part of the emitted query text.
pub const HR_SITES: [&str; 6] = [
    "greenhouse.io",
    "breezy.hr",
    "lever.co",
    "apply.workable.com",
    "bamboohr.com",
    "jobs.lever.co",
];

/// `( site:a OR site:b ... )` over the whole allowlist.
pub fn default_site_group() -> String {
    let sites = HR_SITES
        .iter()
        .map(|site| format!("site:{site}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("( {sites} )")
}

/// Serialize parts into one search string.
///
/// Every part yields exactly one token; any encoding failure aborts the
/// whole build. When no encoded token mentions an allowlisted site, the
/// default site group is appended.
pub fn build_query_with<P: DateParser>(
    parts: &[QueryPart],
    calendar: &Calendar<P>,
) -> QueryResult<String> {
    let mut tokens = parts
        .iter()
        .map(|part| part.encode_with(calendar))
        .collect::<QueryResult<Vec<_>>>()?;

    // substring match, `site:jobs.lever.co` also counts as `lever.co`
    let targets_hr_site = tokens
        .iter()
        .any(|token| HR_SITES.iter().any(|site| token.contains(site)));

    if !targets_hr_site {
        log::debug!("no hr site in query, adding default site group");
        tokens.push(default_site_group());
    }

    Ok(tokens
        .iter()
        .map(|token| token.trim())
        .collect::<Vec<_>>()
        .join(" "))
}

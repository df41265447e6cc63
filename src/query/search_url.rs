use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::errors::QueryResult;

pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `base?q=<query>` with spaces written as `+`.
pub fn make_search_url(base: &str, query: &str) -> QueryResult<Url> {
    let encoded = utf8_percent_encode(query, URI_COMPONENT)
        .to_string()
        .replace("%20", "+");

    let mut url = Url::parse(base)?;
    url.set_query(Some(&format!("q={encoded}")));
    Ok(url)
}

pub fn make_google_search_url(query: &str) -> QueryResult<Url> {
    make_search_url(GOOGLE_SEARCH_URL, query)
}

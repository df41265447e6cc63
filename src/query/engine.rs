use url::Url;
use uuid::Uuid;

use super::calendar::{Calendar, DateParser, NaturalDateParser};
use super::part::QueryPart;
use super::search_url::{make_search_url, GOOGLE_SEARCH_URL};
use super::shape::{get_query_parts, QueryShape};
use super::variations::{get_variations_with, Variation, DEFAULT_VARIATION_COUNT};
use super::{build_query_with, fingerprint, parse_query};
use crate::config::Config;
use crate::errors::QueryResult;

/// Query operations bound to one calendar and one set of settings.
#[derive(Debug, Clone)]
pub struct QueryEngine<P = NaturalDateParser> {
    calendar: Calendar<P>,
    variation_count: usize,
    search_url: String,
}

impl Default for QueryEngine<NaturalDateParser> {
    fn default() -> Self {
        Self::with_calendar(Calendar::new())
    }
}

impl QueryEngine<NaturalDateParser> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        let calendar = match config.reference_date {
            Some(today) => Calendar::new().pinned_to(today),
            None => Calendar::new(),
        };

        Self::with_calendar(calendar)
            .with_variation_count(config.variation_count)
            .with_search_url(&config.search_url)
    }
}

impl<P: DateParser> QueryEngine<P> {
    pub fn with_calendar(calendar: Calendar<P>) -> Self {
        Self {
            calendar,
            variation_count: DEFAULT_VARIATION_COUNT,
            search_url: GOOGLE_SEARCH_URL.to_string(),
        }
    }

    pub fn with_variation_count(mut self, count: usize) -> Self {
        self.variation_count = count;
        self
    }

    pub fn with_search_url(mut self, base: &str) -> Self {
        self.search_url = base.to_string();
        self
    }

    pub fn calendar(&self) -> &Calendar<P> {
        &self.calendar
    }

    pub fn build_query(&self, parts: &[QueryPart]) -> QueryResult<String> {
        build_query_with(parts, &self.calendar)
    }

    pub fn parse_query(&self, query: &str) -> QueryResult<Vec<QueryPart>> {
        parse_query(query)
    }

    pub fn get_variations(&self, query: &str) -> QueryResult<Vec<Variation>> {
        get_variations_with(query, &self.calendar, self.variation_count)
    }

    pub fn get_query_parts(&self, query: &str) -> QueryResult<QueryShape> {
        get_query_parts(query)
    }

    pub fn search_url(&self, query: &str) -> QueryResult<Url> {
        make_search_url(&self.search_url, query)
    }

    pub fn fingerprint(&self, query: &str) -> QueryResult<Uuid> {
        fingerprint::query_fingerprint(query)
    }
}

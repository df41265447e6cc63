//! Month arithmetic and date resolution for `after:`/`before:` bounds.
//!
//! Every date the DSL emits is anchored to the first day of a month, so
//! shifting never drifts on month length.

use std::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::{QueryError, QueryResult};

const MONTH_NAMES: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("valid regex"));

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})\b").expect("valid regex"));

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_NAMES})\.?(?:\s+(\d{{1,2}})(?:st|nd|rd|th)?)?,?\s+(\d{{4}})\b"
    ))
    .expect("valid regex")
});

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTH_NAMES})\.?,?\s+(\d{{4}})\b"
    ))
    .expect("valid regex")
});

static RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(today|now|yesterday|tomorrow|last\s+month|next\s+month|(\d{1,4})\s+months?\s+ago)\b",
    )
    .expect("valid regex")
});

/// Resolves free text such as `"February, 2023"` into a calendar date.
///
/// Implementations must not panic; `None` means the text carries no
/// recognizable date and callers fall back to the reference date.
pub trait DateParser: Send + Sync {
    fn parse_natural_date(&self, text: &str, reference: NaiveDate) -> Option<NaiveDate>;
}

impl<F> DateParser for F
where
    F: Fn(&str, NaiveDate) -> Option<NaiveDate> + Send + Sync,
{
    fn parse_natural_date(&self, text: &str, reference: NaiveDate) -> Option<NaiveDate> {
        self(text, reference)
    }
}

/// Regex based resolver for the date shapes people type into a search form.
///
/// The earliest date found in the text wins, so a full query string such as
/// `remote after:2023-02-01` resolves to its first date bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateParser;

impl DateParser for NaturalDateParser {
    fn parse_natural_date(&self, text: &str, reference: NaiveDate) -> Option<NaiveDate> {
        let candidates = [
            earliest(&ISO_DATE, text, |caps| {
                NaiveDate::from_ymd_opt(number(caps, 1)?, number(caps, 2)?, number(caps, 3)?)
            }),
            earliest(&YEAR_MONTH, text, |caps| {
                NaiveDate::from_ymd_opt(number(caps, 1)?, number(caps, 2)?, 1)
            }),
            earliest(&MONTH_DAY_YEAR, text, |caps| {
                let month = month_number(caps.get(1)?.as_str())?;
                let day = number(caps, 2).unwrap_or(1);
                NaiveDate::from_ymd_opt(number(caps, 3)?, month, day)
            }),
            earliest(&DAY_MONTH_YEAR, text, |caps| {
                let month = month_number(caps.get(2)?.as_str())?;
                NaiveDate::from_ymd_opt(number(caps, 3)?, month, number(caps, 1)?)
            }),
            earliest(&RELATIVE, text, |caps| relative(caps, reference)),
        ];

        // min_by_key keeps the first of equal starts, so pattern order breaks ties
        candidates
            .into_iter()
            .flatten()
            .min_by_key(|(start, _)| *start)
            .map(|(_, date)| date)
    }
}

fn earliest<F>(re: &Regex, text: &str, build: F) -> Option<(usize, NaiveDate)>
where
    F: Fn(&Captures) -> Option<NaiveDate>,
{
    re.captures_iter(text).find_map(|caps| {
        let start = caps.get(0)?.start();
        build(&caps).map(|date| (start, date))
    })
}

fn number<T: FromStr>(caps: &Captures, idx: usize) -> Option<T> {
    caps.get(idx)?.as_str().parse().ok()
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn relative(caps: &Captures, reference: NaiveDate) -> Option<NaiveDate> {
    if let Some(months) = number::<u32>(caps, 2) {
        return reference.checked_sub_months(Months::new(months));
    }

    let phrase = caps
        .get(1)?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match phrase.as_str() {
        "today" | "now" => Some(reference),
        "yesterday" => reference.checked_sub_days(Days::new(1)),
        "tomorrow" => reference.checked_add_days(Days::new(1)),
        "last month" => reference.checked_sub_months(Months::new(1)),
        "next month" => reference.checked_add_months(Months::new(1)),
        _ => None,
    }
}

/// Returns the 1st of the month `months` away from `date`'s month.
pub fn shift_month(date: NaiveDate, months: i32) -> QueryResult<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok();
    let month = index.rem_euclid(12) as u32 + 1;

    year.and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
        .ok_or(QueryError::DateOutOfRange { date, months })
}

/// Wire format of `after:`/`before:` values: `YYYY-MM-01`.
pub fn format_for_date_operator(date: NaiveDate) -> String {
    format!("{:04}-{:02}-01", date.year(), date.month())
}

/// Human label for a month, e.g. `January, 2023`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B, %Y").to_string()
}

/// Date resolution with an injected parser and an optionally pinned "today".
#[derive(Debug, Clone, Default)]
pub struct Calendar<P = NaturalDateParser> {
    parser: P,
    today: Option<NaiveDate>,
}

impl Calendar<NaturalDateParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DateParser> Calendar<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            today: None,
        }
    }

    /// Pin "now" so resolution becomes deterministic.
    pub fn pinned_to(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Resolves `text` to a date, falling back to today. Never fails.
    pub fn resolve(&self, text: Option<&str>) -> NaiveDate {
        let today = self.today();
        let text = text.map(str::trim).filter(|t| !t.is_empty());

        match text.and_then(|t| self.parser.parse_natural_date(t, today)) {
            Some(date) => date,
            None => {
                log::debug!("no date in {text:?}, using {today}");
                today
            }
        }
    }

    /// The month before whatever `text` resolves to.
    pub fn last_month(&self, text: Option<&str>) -> QueryResult<NaiveDate> {
        shift_month(self.resolve(text), -1)
    }
}

/// [`Calendar::last_month`] against the default parser and the real clock.
pub fn parse_last_month_date(text: Option<&str>) -> QueryResult<NaiveDate> {
    Calendar::new().last_month(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(text: &str) -> Option<NaiveDate> {
        NaturalDateParser.parse_natural_date(text, date(2024, 6, 15))
    }

    #[test]
    fn test_shift_month_normalizes_day() {
        assert_eq!(shift_month(date(2023, 3, 31), -1).unwrap(), date(2023, 2, 1));
        assert_eq!(shift_month(date(2023, 1, 15), 0).unwrap(), date(2023, 1, 1));
    }

    #[test]
    fn test_shift_month_across_years() {
        assert_eq!(shift_month(date(2023, 1, 10), -1).unwrap(), date(2022, 12, 1));
        assert_eq!(shift_month(date(2022, 11, 2), 3).unwrap(), date(2023, 2, 1));
        assert_eq!(shift_month(date(2023, 2, 1), -25).unwrap(), date(2021, 1, 1));
    }

    #[test]
    fn test_shift_month_out_of_range() {
        assert!(matches!(
            shift_month(NaiveDate::MAX, 1),
            Err(QueryError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_format_for_date_operator() {
        assert_eq!(format_for_date_operator(date(2023, 1, 20)), "2023-01-01");
        assert_eq!(format_for_date_operator(date(2022, 12, 1)), "2022-12-01");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(date(2023, 1, 1)), "January, 2023");
    }

    #[test]
    fn test_parse_month_name_year() {
        assert_eq!(parse("February, 2023"), Some(date(2023, 2, 1)));
        assert_eq!(parse("jan 2021"), Some(date(2021, 1, 1)));
        assert_eq!(parse("March 5th, 2022"), Some(date(2022, 3, 5)));
        assert_eq!(parse("5 March 2022"), Some(date(2022, 3, 5)));
    }

    #[test]
    fn test_parse_iso_forms() {
        assert_eq!(parse("2023-02-01"), Some(date(2023, 2, 1)));
        assert_eq!(parse("before:2023-01"), Some(date(2023, 1, 1)));
        assert_eq!(parse("2023-13-01"), None);
    }

    #[test]
    fn test_parse_earliest_wins() {
        assert_eq!(
            parse("remote marketing site:jobs.io after:2023-02-01 before:2023-05-01"),
            Some(date(2023, 2, 1))
        );
    }

    #[test]
    fn test_parse_ignores_month_prefixes_in_words() {
        assert_eq!(parse("remote marketing 2023"), None);
    }

    #[test]
    fn test_parse_relative() {
        assert_eq!(parse("today"), Some(date(2024, 6, 15)));
        assert_eq!(parse("yesterday"), Some(date(2024, 6, 14)));
        assert_eq!(parse("last month"), Some(date(2024, 5, 15)));
        assert_eq!(parse("3 months ago"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_resolve_falls_back_to_today() {
        let calendar = Calendar::new().pinned_to(date(2024, 6, 15));
        assert_eq!(calendar.resolve(None), date(2024, 6, 15));
        assert_eq!(calendar.resolve(Some("whenever")), date(2024, 6, 15));
        assert_eq!(calendar.resolve(Some("   ")), date(2024, 6, 15));
    }

    #[test]
    fn test_last_month() {
        let calendar = Calendar::new().pinned_to(date(2024, 6, 15));
        assert_eq!(calendar.last_month(Some("January, 2023")).unwrap(), date(2022, 12, 1));
        assert_eq!(calendar.last_month(None).unwrap(), date(2024, 5, 1));
    }

    #[test]
    fn test_injected_parser() {
        let calendar = Calendar::with_parser(|_: &str, _: NaiveDate| Some(date(2020, 3, 9)));
        assert_eq!(calendar.last_month(Some("anything")).unwrap(), date(2020, 2, 1));
    }
}

//! Free-text date parsing into the board's canonical date form.
//!
//! Canonical form: `Mon Jan 26` (weekday, month, day; no year), or one of the
//! sentinels `Future` / `TBD`. A year-bearing variant, `Mon Jan 26 2026`, is
//! also produced on request and parsed back the same way.

use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{NormalizeError, Result};
use crate::keywords::Keywords;

pub const FUTURE: &str = "Future";
pub const TBD: &str = "TBD";

static MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/](\d{1,2})$").expect("valid month-day pattern"));
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid iso pattern"));
static DAY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?$").expect("valid day pattern"));
static YEAR_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid year pattern"));

/// A normalized date: a real calendar day, or a sentinel for "no date".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CanonicalDate {
    Date(NaiveDate),
    /// Intentionally unscheduled.
    Future,
    /// No date assigned yet.
    Tbd,
}

impl CanonicalDate {
    /// The calendar day, or `None` for sentinels.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CanonicalDate::Date(d) => Some(*d),
            CanonicalDate::Future | CanonicalDate::Tbd => None,
        }
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(self))
    }
}

/// Configuration options for date parsing.
///
/// The parser never reads the clock: callers decide which year a year-less
/// input such as `"Feb 6"` belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Year used for inputs that carry none (`"Feb 6"`, `"02-06"`).
    pub default_year: i32,
}

impl ParseOptions {
    pub fn with_year(year: i32) -> Self {
        Self { default_year: year }
    }
}

/// Parses a free-text date into a [`CanonicalDate`].
///
/// The trimmed input is matched against these shapes, first match wins:
/// 1.  **Sentinels**: `Future` and `TBD`, case-sensitive.
/// 2.  **Month/day**: `MM-DD` or `MM/DD` with one or two digits each, in the default year.
/// 3.  **ISO**: `YYYY-MM-DD`.
/// 4.  **Words**: whitespace separated tokens, case-insensitive. The last month name
///     (`February`, `Feb`) and the last number between 1 and 31 are used. Weekday
///     names are ignored and never checked against the result. A four digit token
///     sets the year.
///
/// Impossible days such as Feb 30 are rejected, never rolled into the next month.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use storyboard_core::parse_date::{parse_date, CanonicalDate, ParseOptions};
/// let opts = ParseOptions::with_year(2026);
/// let feb_6 = CanonicalDate::Date(NaiveDate::from_ymd_opt(2026, 2, 6).unwrap());
///
/// assert_eq!(parse_date("2/6", opts).unwrap(), feb_6);
/// assert_eq!(parse_date("Fri Feb 6", opts).unwrap(), feb_6);
/// assert_eq!(parse_date("TBD", opts).unwrap(), CanonicalDate::Tbd);
/// assert!(parse_date("2026-02-30", opts).is_err());
/// ```
pub fn parse_date(raw: &str, options: ParseOptions) -> Result<CanonicalDate> {
    let default_year = options.default_year;
    let trimmed = raw.trim();

    if trimmed == FUTURE {
        return Ok(CanonicalDate::Future);
    }
    if trimmed == TBD {
        return Ok(CanonicalDate::Tbd);
    }

    if let Some(caps) = MONTH_DAY.captures(trimmed) {
        let month = number(&caps[1]);
        let day = number(&caps[2]);
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(NormalizeError::parse_failure(raw));
        }
        return calendar_date(raw, default_year, month, day);
    }

    if let Some(caps) = ISO_DATE.captures(trimmed) {
        let year = caps[1].parse::<i32>().unwrap_or_default();
        return calendar_date(raw, year, number(&caps[2]), number(&caps[3]));
    }

    parse_words(raw, trimmed, default_year)
}

/// Canonical display string: `"Mon Jan 26"`, or the sentinel's literal name.
pub fn format_date(date: &CanonicalDate) -> String {
    match date {
        CanonicalDate::Date(d) => d.format("%a %b %-d").to_string(),
        CanonicalDate::Future => FUTURE.to_string(),
        CanonicalDate::Tbd => TBD.to_string(),
    }
}

/// Like [`format_date`] but keeps the year: `"Mon Jan 26 2026"`.
pub fn format_date_with_year(date: &CanonicalDate) -> String {
    match date {
        CanonicalDate::Date(d) => d.format("%a %b %-d %Y").to_string(),
        other => format_date(other),
    }
}

/// Normalizes user input for storage.
///
/// Returns the canonical string when `raw` parses, otherwise `raw` itself,
/// untouched, so the user can fix it later.
pub fn normalize_date_input(raw: &str, options: ParseOptions, with_year: bool) -> String {
    match parse_date(raw, options) {
        Ok(date) if with_year => format_date_with_year(&date),
        Ok(date) => format_date(&date),
        Err(e) => {
            debug!("keeping raw date text: {e}");
            raw.to_string()
        }
    }
}

fn parse_words(raw: &str, trimmed: &str, default_year: i32) -> Result<CanonicalDate> {
    let lower = trimmed.to_lowercase();
    let mut month = None;
    let mut day = None;
    let mut year = None;

    for word in lower.split_whitespace() {
        let word = word.trim_end_matches([',', '.']);
        if let Some(m) = Keywords::month(word) {
            month = Some(m);
        } else if let Some(caps) = DAY_TOKEN.captures(word) {
            let n = number(&caps[1]);
            if (1..=31).contains(&n) {
                day = Some(n);
            }
        } else if YEAR_TOKEN.is_match(word) {
            year = word.parse::<i32>().ok();
        }
    }

    match (month, day) {
        (Some(month), Some(day)) => calendar_date(raw, year.unwrap_or(default_year), month, day),
        _ => Err(NormalizeError::parse_failure(raw)),
    }
}

fn calendar_date(raw: &str, year: i32, month: u32, day: u32) -> Result<CanonicalDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(CanonicalDate::Date)
        .ok_or_else(|| NormalizeError::InvalidCalendarDate {
            input: raw.to_string(),
            year,
            month,
            day,
        })
}

/// Digits already matched by a pattern; at most four of them, so this never overflows.
fn number(digits: &str) -> u32 {
    digits.parse().unwrap_or_default()
}

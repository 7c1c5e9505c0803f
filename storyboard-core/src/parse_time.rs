use chrono::{NaiveTime, Timelike};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{NormalizeError, Result};
use crate::keywords::{Keyword, Keywords};

static MERIDIEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ap]\.?\s?m\.?").expect("valid meridiem pattern"));
static HOUR_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid hh:mm pattern"));
static FOUR_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})$").expect("valid hhmm pattern"));
static HOUR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})$").expect("valid hh pattern"));

/// Parses a free-text time of day.
///
/// This function is case-insensitive and understands, in order:
/// 1.  **Keywords**: `noon` (12:00), `midnight` (00:00), plus configured synonyms.
/// 2.  **H:MM / HH:MM**: minutes must have two digits. e.g. "3:30", "15:30".
/// 3.  **HHMM**: exactly four digits. e.g. "1530", "0800".
/// 4.  **H / HH**: a bare hour. e.g. "8", "15".
///
/// An `am`/`pm` marker (`pm`, `p.m`, `p m`...) anywhere in the input switches
/// to the 12-hour clock: pm adds 12 to hours below 12, `12am` is midnight.
/// Without a marker the hour is read as 24-hour. Out of range results are
/// rejected, never clamped.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveTime;
/// # use storyboard_core::parse_time::parse_time;
/// let half_three = NaiveTime::from_hms_opt(15, 30, 0).unwrap();
/// assert_eq!(parse_time("3:30pm").unwrap(), half_three);
/// assert_eq!(parse_time("1530").unwrap(), half_three);
/// assert_eq!(parse_time("12am").unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
/// assert!(parse_time("25:00").is_err());
/// ```
pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    let lower = raw.trim().to_lowercase();

    let (hour, minute) = if Keywords::matches(Keyword::Noon, &lower) {
        (12, 0)
    } else if Keywords::matches(Keyword::Midnight, &lower) {
        (0, 0)
    } else {
        twelve_to_twenty_four(&lower).ok_or_else(|| NormalizeError::parse_failure(raw))?
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| NormalizeError::InvalidClockTime {
        input: raw.to_string(),
        hour,
        minute,
    })
}

/// Canonical display string: `"3:30 PM"`, `"12:00 AM"`.
pub fn format_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display_hour}:{:02} {period}", time.minute())
}

/// [`format_time`] for a bare 24-hour `(hour, minute)` pair.
pub fn format_hour_minute(hour: u32, minute: u32) -> Result<String> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .map(format_time)
        .ok_or_else(|| NormalizeError::InvalidClockTime {
            input: format!("{hour}:{minute:02}"),
            hour,
            minute,
        })
}

/// Normalizes user input for storage.
///
/// Blank input clears the time (`None`). Anything that parses becomes canonical;
/// anything else is kept verbatim so the user can correct it.
pub fn normalize_time_input(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse_time(raw) {
        Ok(time) => Some(format_time(time)),
        Err(e) => {
            debug!("keeping raw time text: {e}");
            Some(raw.to_string())
        }
    }
}

fn twelve_to_twenty_four(lower: &str) -> Option<(u32, u32)> {
    let is_pm = lower.contains("pm") || lower.contains("p.m") || lower.contains("p m");
    let is_am = lower.contains("am") || lower.contains("a.m") || lower.contains("a m");

    let cleaned: String = MERIDIEM
        .replace_all(lower, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let (mut hour, minute) = split_clock(&cleaned)?;
    if is_pm && hour < 12 {
        hour += 12;
    } else if is_am && hour == 12 {
        hour = 0;
    }
    Some((hour, minute))
}

fn split_clock(cleaned: &str) -> Option<(u32, u32)> {
    if let Some(caps) = HOUR_MINUTE.captures(cleaned) {
        return Some((caps[1].parse().ok()?, caps[2].parse().ok()?));
    }
    if let Some(caps) = FOUR_DIGITS.captures(cleaned) {
        return Some((caps[1].parse().ok()?, caps[2].parse().ok()?));
    }
    if let Some(caps) = HOUR_ONLY.captures(cleaned) {
        return Some((caps[1].parse().ok()?, 0));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn twelve_hour_forms() {
        assert_eq!(parse_time("3:30pm").unwrap(), hm(15, 30));
        assert_eq!(parse_time("3:30 PM").unwrap(), hm(15, 30));
        assert_eq!(parse_time("3:30 p.m.").unwrap(), hm(15, 30));
        assert_eq!(parse_time("3:30 p m").unwrap(), hm(15, 30));
        assert_eq!(parse_time("8pm").unwrap(), hm(20, 0));
        assert_eq!(parse_time("8 AM").unwrap(), hm(8, 0));
        assert_eq!(parse_time("8 a.m.").unwrap(), hm(8, 0));
        assert_eq!(parse_time("0800am").unwrap(), hm(8, 0));
    }

    #[test]
    fn noon_and_midnight_edges() {
        assert_eq!(parse_time("12am").unwrap(), hm(0, 0));
        assert_eq!(parse_time("12pm").unwrap(), hm(12, 0));
        assert_eq!(parse_time("12:45AM").unwrap(), hm(0, 45));
        assert_eq!(parse_time("noon").unwrap(), hm(12, 0));
        assert_eq!(parse_time("Midnight").unwrap(), hm(0, 0));
    }

    #[test]
    fn twenty_four_hour_forms() {
        assert_eq!(parse_time("1530").unwrap(), hm(15, 30));
        assert_eq!(parse_time("0800").unwrap(), hm(8, 0));
        assert_eq!(parse_time("15:30").unwrap(), hm(15, 30));
        assert_eq!(parse_time("8:00").unwrap(), hm(8, 0));
        assert_eq!(parse_time(" 8 ").unwrap(), hm(8, 0));
        assert_eq!(parse_time("23").unwrap(), hm(23, 0));
        assert_eq!(parse_time("0").unwrap(), hm(0, 0));
    }

    #[test]
    fn pm_on_afternoon_hour_is_left_alone() {
        assert_eq!(parse_time("13pm").unwrap(), hm(13, 0));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(matches!(
            parse_time("25:00"),
            Err(NormalizeError::InvalidClockTime { hour: 25, minute: 0, .. })
        ));
        assert!(matches!(
            parse_time("9:99"),
            Err(NormalizeError::InvalidClockTime { hour: 9, minute: 99, .. })
        ));
        assert!(parse_time("24").is_err());
        assert!(parse_time("2460").is_err());
    }

    #[test]
    fn unrecognized_input_fails() {
        for raw in ["", "soon", "3:5", "12345", "3:30:15", "half past"] {
            assert!(
                matches!(parse_time(raw), Err(NormalizeError::ParseFailure { .. })),
                "{raw}"
            );
        }
    }

    #[test]
    fn format_twelve_hour() {
        assert_eq!(format_time(hm(0, 0)), "12:00 AM");
        assert_eq!(format_time(hm(0, 5)), "12:05 AM");
        assert_eq!(format_time(hm(9, 0)), "9:00 AM");
        assert_eq!(format_time(hm(12, 0)), "12:00 PM");
        assert_eq!(format_time(hm(15, 30)), "3:30 PM");
        assert_eq!(format_time(hm(23, 59)), "11:59 PM");
        assert_eq!(format_hour_minute(19, 0).unwrap(), "7:00 PM");
        assert!(format_hour_minute(24, 0).is_err());
    }

    #[test]
    fn normalize_input() {
        assert_eq!(normalize_time_input("3pm").as_deref(), Some("3:00 PM"));
        assert_eq!(normalize_time_input("   "), None);
        assert_eq!(normalize_time_input("after lunch").as_deref(), Some("after lunch"));
    }

    proptest! {
        #[test]
        fn canonical_form_round_trips(hour in 0u32..24, minute in 0u32..60) {
            let formatted = format_hour_minute(hour, minute).unwrap();
            prop_assert_eq!(parse_time(&formatted).unwrap(), hm(hour, minute));
        }
    }
}

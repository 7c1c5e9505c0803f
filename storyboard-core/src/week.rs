//! "This week" / "next week" windows and the board filters built on them.
//!
//! Weeks run Sunday to Saturday. Nothing here reads the clock: callers pass
//! the reference instant, in whatever zone the board is planned in.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use strum_macros::{AsRefStr, EnumString};

use crate::board::{Board, ContentItem};
use crate::parse_date::{ParseOptions, parse_date};

/// Which slice of the board to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum WeekView {
    #[default]
    ThisWeek,
    NextWeek,
    All,
}

/// An inclusive Sunday..Saturday range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// The week right after this one.
    pub fn following(&self) -> Self {
        let start = self.end + Duration::days(1);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether a stored date string names a day inside this window.
    ///
    /// Year-less strings are read in the window's year, or in either year when
    /// the window straddles New Year.
    pub fn contains_text(&self, text: &str) -> bool {
        let mut years = vec![self.start.year()];
        if self.end.year() != self.start.year() {
            years.push(self.end.year());
        }
        years.into_iter().any(|year| {
            parse_date(text, ParseOptions::with_year(year))
                .ok()
                .and_then(|date| date.as_date())
                .is_some_and(|date| self.contains(date))
        })
    }

    /// `Week of Jan 25 - Jan 31, 2026`
    pub fn label(&self) -> String {
        format!(
            "Week of {} - {}, {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d"),
            self.end.year()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBoundaries {
    pub this_week: WeekWindow,
    pub next_week: WeekWindow,
}

impl WeekBoundaries {
    /// The window for `view`, `None` for [`WeekView::All`].
    pub fn window(&self, view: WeekView) -> Option<WeekWindow> {
        match view {
            WeekView::ThisWeek => Some(self.this_week),
            WeekView::NextWeek => Some(self.next_week),
            WeekView::All => None,
        }
    }
}

/// Computes this week's and next week's windows around `now`.
///
/// The calendar day is taken in `now`'s own time zone, so a board planned in
/// `America/New_York` should pass `Utc::now().with_timezone(&New_York)`.
///
/// # Examples
///
/// ```
/// # use chrono::{NaiveDate, TimeZone, Utc};
/// # use storyboard_core::week::week_boundaries;
/// // Thursday
/// let now = Utc.with_ymd_and_hms(2026, 1, 29, 15, 0, 0).unwrap();
/// let weeks = week_boundaries(&now);
///
/// assert_eq!(weeks.this_week.start, NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
/// assert_eq!(weeks.this_week.end, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
/// assert_eq!(weeks.next_week.start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(weeks.next_week.end, NaiveDate::from_ymd_opt(2026, 2, 7).unwrap());
/// ```
pub fn week_boundaries<Tz: TimeZone>(now: &DateTime<Tz>) -> WeekBoundaries {
    week_boundaries_for(now.date_naive())
}

/// [`week_boundaries`] for a plain calendar day.
pub fn week_boundaries_for(today: NaiveDate) -> WeekBoundaries {
    let this_week = WeekWindow::containing(today);
    WeekBoundaries {
        this_week,
        next_week: this_week.following(),
    }
}

/// Anything that carries a stored date string.
pub trait Dated {
    fn date_text(&self) -> &str;
}

impl Dated for ContentItem {
    fn date_text(&self) -> &str {
        &self.date
    }
}

/// Keeps the items visible in `view`, preserving their order.
///
/// [`WeekView::All`] keeps everything. The week views keep only items whose
/// date parses to a real day inside the window; `Future`, `TBD` and
/// unparseable dates never show up there.
pub fn filter_items<T: Dated + Clone>(
    items: &[T],
    view: WeekView,
    weeks: &WeekBoundaries,
) -> Vec<T> {
    let Some(window) = weeks.window(view) else {
        return items.to_vec();
    };
    items
        .iter()
        .filter(|item| window.contains_text(item.date_text()))
        .cloned()
        .collect()
}

/// [`filter_items`] applied to every column of `board`.
pub fn filter_board(board: &Board, view: WeekView, weeks: &WeekBoundaries) -> Board {
    Board {
        ideas: filter_items(&board.ideas, view, weeks),
        production: filter_items(&board.production, view, weeks),
        review: filter_items(&board.review, view, weeks),
        published: filter_items(&board.published, view, weeks),
    }
}

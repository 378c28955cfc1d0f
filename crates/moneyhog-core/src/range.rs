//! Date range filtering for expense and income records
//!
//! Bounds are inclusive and optional. Record dates and bounds are kept as
//! the strings the store returned; they are parsed as `YYYY-MM-DD` at
//! comparison time, and whatever happens when parsing fails is decided
//! by [`on_malformed`] alone.

use chrono::{Duration, NaiveDate};
use moneyhog_store::{Expense, Income};
use serde::{Deserialize, Serialize};

use crate::types::{DatePolicy, Period};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the leading `YYYY-MM-DD` of a record or bound date
///
/// A time of day after the date is ignored. The remainder must start with a
/// non-digit, so a day-first `05-01-2025` is not read as a year-5 date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let (date, rest) = NaiveDate::parse_and_remainder(value.trim(), DATE_FORMAT).ok()?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_digit() => None,
        _ => Some(date),
    }
}

/// Inclusion decision for a record whose date or bound cannot be parsed
pub fn on_malformed(policy: DatePolicy) -> bool {
    match policy {
        DatePolicy::Lenient => true,
        DatePolicy::Strict => false,
    }
}

fn non_empty(bound: Option<&str>) -> Option<&str> {
    bound.filter(|b| !b.trim().is_empty())
}

/// Range check with the default lenient policy
pub fn in_range(date: &str, from: Option<&str>, to: Option<&str>) -> bool {
    in_range_with(date, from, to, DatePolicy::Lenient)
}

/// Check whether `date` falls within the inclusive `[from, to]` range
pub fn in_range_with(date: &str, from: Option<&str>, to: Option<&str>, policy: DatePolicy) -> bool {
    let from = non_empty(from);
    let to = non_empty(to);

    if from.is_none() && to.is_none() {
        return true;
    }

    let date = match parse_date(date) {
        Some(d) => d,
        None => return on_malformed(policy),
    };
    let start = match from.map(parse_date) {
        Some(None) => return on_malformed(policy),
        parsed => parsed.flatten(),
    };
    let end = match to.map(parse_date) {
        Some(None) => return on_malformed(policy),
        parsed => parsed.flatten(),
    };

    match (start, end) {
        (None, None) => true,
        (Some(s), None) => date >= s,
        (None, Some(e)) => date <= e,
        (Some(s), Some(e)) => date >= s && date <= e,
    }
}

/// Optional inclusive date range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl DateRange {
    /// Create a range; empty bounds count as absent
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: non_empty(from).map(|s| s.trim().to_string()),
            to: non_empty(to).map(|s| s.trim().to_string()),
        }
    }

    /// Range with no bounds
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from.format(DATE_FORMAT).to_string()),
            to: Some(to.format(DATE_FORMAT).to_string()),
        }
    }

    pub fn since(from: NaiveDate) -> Self {
        Self {
            from: Some(from.format(DATE_FORMAT).to_string()),
            to: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: &str, policy: DatePolicy) -> bool {
        in_range_with(date, self.from.as_deref(), self.to.as_deref(), policy)
    }

    /// Human-readable description of the range
    pub fn description(&self) -> String {
        match (&self.from, &self.to) {
            (None, None) => "All Time".to_string(),
            (Some(from), None) => format!("Since {}", from),
            (None, Some(to)) => format!("Until {}", to),
            (Some(from), Some(to)) => format!("{} - {}", from, to),
        }
    }
}

/// Resolve a trailing window relative to `today`
///
/// The window opens `N` days before `today` and has no upper bound.
pub fn period_range(period: Period, today: NaiveDate) -> DateRange {
    match period.days() {
        Some(days) => DateRange::since(today - Duration::days(days)),
        None => DateRange::all(),
    }
}

/// Records carrying a serialized calendar date
pub trait Dated {
    fn date(&self) -> &str;
}

impl Dated for Expense {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for Income {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Keep the records whose date lies in `range`
pub fn filter_by_range<'a, T: Dated>(
    records: &'a [T],
    range: &DateRange,
    policy: DatePolicy,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|r| range.contains(r.date(), policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unbounded_always_included() {
        assert!(in_range("2025-01-05", None, None));
        assert!(in_range("garbage", None, None));
        assert!(in_range_with("garbage", None, None, DatePolicy::Strict));
        assert!(in_range("", Some(""), Some("  ")));
    }

    #[test]
    fn test_inclusive_bounds() {
        assert!(in_range("2025-01-05", Some("2025-01-05"), Some("2025-01-05")));
        assert!(in_range("2025-01-01", Some("2025-01-01"), Some("2025-01-31")));
        assert!(in_range("2025-01-31", Some("2025-01-01"), Some("2025-01-31")));
    }

    #[test]
    fn test_after_upper_bound_excluded() {
        assert!(!in_range("2025-02-01", Some("2025-01-31"), Some("2025-01-31")));
        assert!(!in_range("2025-02-01", None, Some("2025-01-31")));
        assert!(!in_range("2024-12-31", Some("2025-01-01"), None));
        assert!(in_range("2025-06-01", Some("2025-01-01"), None));
    }

    #[test]
    fn test_dates_compared_as_calendar_dates() {
        // Not zero padded, would sort wrongly as plain strings
        assert!(in_range("2025-1-9", Some("2025-01-05"), Some("2025-01-10")));
        assert!(!in_range("2025-1-11", Some("2025-01-05"), Some("2025-01-10")));
    }

    #[test]
    fn test_time_of_day_ignored() {
        let from = Some("2025-01-01");
        let to = Some("2025-01-31");
        assert!(!in_range("2025-03-05 10:30", from, to));
        assert!(!in_range("2025-03-05T10:30:00", from, to));
        assert!(in_range("2025-01-31 23:59", from, to));
        assert_eq!(
            parse_date("2025-01-31T08:00:00"),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(parse_date("05-01-2025"), None);
    }

    #[test]
    fn test_malformed_dates_follow_policy() {
        assert!(in_range("not-a-date", Some("2025-01-01"), Some("2025-01-31")));
        assert!(in_range("2025-03-01", Some("bad"), Some("2025-01-31")));
        assert!(!in_range_with(
            "not-a-date",
            Some("2025-01-01"),
            Some("2025-01-31"),
            DatePolicy::Strict
        ));
        assert!(!in_range_with("2025-01-10", None, Some("31/01/2025"), DatePolicy::Strict));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(Some("2025-01-01"), Some(""));
        assert_eq!(range.from.as_deref(), Some("2025-01-01"));
        assert_eq!(range.to, None);
        assert!(!range.is_unbounded());
        assert_eq!(range.description(), "Since 2025-01-01");

        let range = DateRange::between(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(range.description(), "2025-01-01 - 2025-01-31");
        assert!(range.contains("2025-01-15", DatePolicy::Lenient));
        assert!(!range.contains("2025-02-15", DatePolicy::Lenient));

        assert_eq!(DateRange::all().description(), "All Time");
    }

    #[test]
    fn test_period_range() {
        let today = date(2025, 3, 31);
        assert_eq!(
            period_range(Period::Last7Days, today),
            DateRange::since(date(2025, 3, 24))
        );
        assert_eq!(
            period_range(Period::Last30Days, today),
            DateRange::since(date(2025, 3, 1))
        );
        assert!(period_range(Period::All, today).is_unbounded());
    }

    #[test]
    fn test_filter_by_range() {
        let expenses: Vec<Expense> = ["2025-01-05", "2025-02-01", "oops"]
            .iter()
            .map(|d| Expense {
                date: d.to_string(),
                ..Default::default()
            })
            .collect();
        let range = DateRange::new(Some("2025-01-01"), Some("2025-01-31"));

        let lenient = filter_by_range(&expenses, &range, DatePolicy::Lenient);
        assert_eq!(lenient.len(), 2);
        let strict = filter_by_range(&expenses, &range, DatePolicy::Strict);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].date, "2025-01-05");
    }
}

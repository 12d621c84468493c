//! Date windows for time-bounded discovery categories
//!
//! TMDB's discover endpoint filters by release/air date ranges. The windows
//! here use whole-day arithmetic (N * 24h), matching provider semantics;
//! calendar-month math would drift at month boundaries. "Today" is always
//! passed in by the caller so the functions stay pure and testable.

use chrono::{Duration, NaiveDate};

/// Window width for "now playing" and "on the air".
const WINDOW_DAYS: i64 = 30;

/// An inclusive date range; `to` is `None` for open-ended windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// Lower bound formatted as the provider expects (`YYYY-MM-DD`).
    pub fn from_str(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// Upper bound formatted as `YYYY-MM-DD`, if bounded.
    pub fn to_str(&self) -> Option<String> {
        self.to.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// Movies released within the last 30 days.
pub fn now_playing_window(today: NaiveDate) -> DateWindow {
    DateWindow {
        from: today - Duration::days(WINDOW_DAYS),
        to: Some(today),
    }
}

/// Movies releasing from today onward (no upper bound).
pub fn upcoming_window(today: NaiveDate) -> DateWindow {
    DateWindow {
        from: today,
        to: None,
    }
}

/// TV episodes airing today (both bounds on the same calendar day).
pub fn airing_today_window(today: NaiveDate) -> DateWindow {
    DateWindow {
        from: today,
        to: Some(today),
    }
}

/// TV episodes airing within the next 30 days.
pub fn on_the_air_window(today: NaiveDate) -> DateWindow {
    DateWindow {
        from: today,
        to: Some(today + Duration::days(WINDOW_DAYS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_now_playing_is_exactly_30_days_back() {
        let w = now_playing_window(date(2024, 3, 15));
        assert_eq!(w.from, date(2024, 2, 14));
        assert_eq!(w.to, Some(date(2024, 3, 15)));
        assert_eq!(w.from_str(), "2024-02-14");
        assert_eq!(w.to_str().as_deref(), Some("2024-03-15"));
    }

    #[test]
    fn test_on_the_air_is_exactly_30_days_forward() {
        let w = on_the_air_window(date(2024, 3, 15));
        assert_eq!(w.from, date(2024, 3, 15));
        assert_eq!(w.to, Some(date(2024, 4, 14)));
    }

    #[test]
    fn test_upcoming_has_no_upper_bound() {
        let w = upcoming_window(date(2024, 3, 15));
        assert_eq!(w.from, date(2024, 3, 15));
        assert_eq!(w.to, None);
        assert_eq!(w.to_str(), None);
    }

    #[test]
    fn test_airing_today_is_a_single_day() {
        let w = airing_today_window(date(2024, 12, 31));
        assert_eq!(w.from, w.to.unwrap());
        assert_eq!(w.from_str(), "2024-12-31");
    }

    #[test]
    fn test_whole_day_arithmetic_crosses_year_boundary() {
        // 30 * 24h from Jan 10 lands on Dec 11 of the prior year, not "one
        // month earlier".
        let w = now_playing_window(date(2024, 1, 10));
        assert_eq!(w.from, date(2023, 12, 11));
    }

    #[test]
    fn test_leap_day_handling() {
        let w = now_playing_window(date(2024, 3, 1));
        // 2024 is a leap year: 30 days back passes through Feb 29.
        assert_eq!(w.from, date(2024, 1, 31));
    }
}

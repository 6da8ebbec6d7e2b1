//! Calendar windows used for time-based spending
//!
//! A window covers `[start, end)`: the start day is included, the end day
//! is not.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar week containing `date`, starting on `week_start`
    pub fn week_containing(date: NaiveDate, week_start: Weekday) -> Self {
        let offset = (7 + date.weekday().num_days_from_monday()
            - week_start.num_days_from_monday())
            % 7;
        let start = date
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN);
        let end = start.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// The calendar month containing `date`
    pub fn month_containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// The `days` days ending on `last_day` (inclusive)
    pub fn last_days(last_day: NaiveDate, days: u32) -> Self {
        let start = last_day
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        let end = last_day.succ_opt().unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Last day inside the window
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    /// Every day in the window, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d < self.end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.last_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starting_monday() {
        // 2025-03-13 is a Thursday
        let week = DateWindow::week_containing(date(2025, 3, 13), Weekday::Mon);
        assert_eq!(week.start, date(2025, 3, 10));
        assert_eq!(week.end, date(2025, 3, 17));
        assert!(week.contains(date(2025, 3, 16)));
        assert!(!week.contains(date(2025, 3, 17)));
    }

    #[test]
    fn test_week_starting_sunday() {
        let week = DateWindow::week_containing(date(2025, 3, 13), Weekday::Sun);
        assert_eq!(week.start, date(2025, 3, 9));

        let on_start = DateWindow::week_containing(date(2025, 3, 9), Weekday::Sun);
        assert_eq!(on_start.start, date(2025, 3, 9));
    }

    #[test]
    fn test_month_window() {
        let feb = DateWindow::month_containing(date(2024, 2, 29));
        assert_eq!(feb.start, date(2024, 2, 1));
        assert_eq!(feb.end, date(2024, 3, 1));

        let dec = DateWindow::month_containing(date(2025, 12, 31));
        assert_eq!(dec.end, date(2026, 1, 1));
        assert_eq!(dec.to_string(), "2025-12-01 to 2025-12-31");
    }

    #[test]
    fn test_last_days() {
        let window = DateWindow::last_days(date(2025, 1, 3), 7);
        assert_eq!(window.start, date(2024, 12, 28));
        assert_eq!(window.days().count(), 7);
        assert_eq!(window.last_day(), date(2025, 1, 3));
    }
}

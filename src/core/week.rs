// Monday-anchored week window used to scope every grid fetch and edit.
//
// Purpose
// - Snap an arbitrary calendar date to the Monday of its week and expose
//   the resulting 7-day span.
//
// Boundaries
// - Pure calendar arithmetic. No input or output.

use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    monday: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`, anchored to its Monday.
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_monday());
        Self {
            monday: date - Days::new(back),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.monday
    }

    /// Sunday, the last day of the window.
    pub fn end(&self) -> NaiveDate {
        self.monday + Days::new(6)
    }

    pub fn dates(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.monday + Days::new(i as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    pub fn prev(&self) -> Self {
        Self {
            monday: self.monday - Days::new(7),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Days::new(7),
        }
    }

    /// Calendar year of the week start; used to scope the leave lookup.
    pub fn year(&self) -> i32 {
        self.monday.year()
    }
}

#[cfg(test)]
mod week_window_tests {
    use super::*;
    use chrono::Weekday;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("2024-01-01")] // a Monday
    #[case("2024-01-03")]
    #[case("2024-01-07")] // the Sunday of the same week
    fn it_should_anchor_any_day_of_the_week_to_monday(#[case] input: &str) {
        let week = WeekWindow::containing(date(input));
        assert_eq!(week.start(), date("2024-01-01"));
        assert_eq!(week.start().weekday(), Weekday::Mon);
        assert_eq!(week.end(), date("2024-01-07"));
    }

    #[rstest]
    fn it_should_yield_seven_consecutive_dates() {
        let week = WeekWindow::containing(date("2024-01-04"));
        let dates = week.dates();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date("2024-01-01"));
        assert_eq!(dates[6], date("2024-01-07"));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }

    #[rstest]
    fn it_should_step_whole_weeks(#[values(false, true)] forward: bool) {
        let week = WeekWindow::containing(date("2024-01-01"));
        let stepped = if forward { week.next() } else { week.prev() };
        let expected = if forward { "2024-01-08" } else { "2023-12-25" };
        assert_eq!(stepped.start(), date(expected));
        assert_eq!(stepped.start().weekday(), Weekday::Mon);
    }

    #[rstest]
    fn it_should_report_membership_inclusively() {
        let week = WeekWindow::containing(date("2024-01-01"));
        assert!(week.contains(date("2024-01-01")));
        assert!(week.contains(date("2024-01-07")));
        assert!(!week.contains(date("2024-01-08")));
        assert!(!week.contains(date("2023-12-31")));
    }
}

// Holiday and leave reference data for the visible week.
//
// Purpose
// - Index active holidays and approved leave days by date so validation
//   and display layers can classify each cell with a map lookup.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::core::model::{HolidayCalendarEntry, LeaveDay};

/// Classification of a calendar date. Holiday wins over leave, leave
/// over weekend, matching how the original grid flags its columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayKind<'a> {
    Holiday(&'a HolidayCalendarEntry),
    Leave(&'a LeaveDay),
    Weekend,
    Workday,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceCalendar {
    holidays: BTreeMap<NaiveDate, HolidayCalendarEntry>,
    leaves: BTreeMap<NaiveDate, LeaveDay>,
}

/// ISO weekday 6 or 7.
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().number_from_monday() >= 6
}

impl ReferenceCalendar {
    /// Index the reference sets by date. Inactive holidays are dropped
    /// here so no caller ever sees them.
    pub fn new(holidays: Vec<HolidayCalendarEntry>, leaves: Vec<LeaveDay>) -> Self {
        let mut calendar = Self::default();
        calendar.set_holidays(holidays);
        calendar.set_leaves(leaves);
        calendar
    }

    /// Replace the holiday set, keeping the leave set; used when one of
    /// the two reference fetches fails and the other must still land.
    pub fn set_holidays(&mut self, holidays: Vec<HolidayCalendarEntry>) {
        self.holidays = holidays
            .into_iter()
            .filter(|h| h.holiday_active)
            .map(|h| (h.holiday_date, h))
            .collect();
    }

    pub fn set_leaves(&mut self, leaves: Vec<LeaveDay>) {
        self.leaves = leaves.into_iter().map(|l| (l.date, l)).collect();
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&HolidayCalendarEntry> {
        self.holidays.get(&date)
    }

    pub fn leave_on(&self, date: NaiveDate) -> Option<&LeaveDay> {
        self.leaves.get(&date)
    }

    pub fn day_kind(&self, date: NaiveDate) -> DayKind<'_> {
        if let Some(holiday) = self.holidays.get(&date) {
            DayKind::Holiday(holiday)
        } else if let Some(leave) = self.leaves.get(&date) {
            DayKind::Leave(leave)
        } else if is_weekend(date) {
            DayKind::Weekend
        } else {
            DayKind::Workday
        }
    }

    /// A date an employee is expected to account for: not a holiday,
    /// not covered by leave, not a weekend.
    pub fn is_expected_workday(&self, date: NaiveDate) -> bool {
        matches!(self.day_kind(date), DayKind::Workday)
    }
}

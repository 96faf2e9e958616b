// Pre-submit validation gate for a week's grid.
//
// Purpose
// - Collect every business-rule violation in one pass so the user sees
//   all problems at once. Validation blocks submit-for-approval only;
//   Save is never gated here.
//
// Boundaries
// - Pure. No input or output.

use chrono::NaiveDate;

use crate::core::grid::WeekGrid;
use crate::core::model::LeaveCategory;
use crate::core::reference::{ReferenceCalendar, is_weekend};

/// One user-visible rule violation. Row numbers are 1-based, matching
/// the rendered grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    TaskNameMissing {
        row: usize,
    },
    HoursOutOfRange {
        row: usize,
        date: NaiveDate,
    },
    HoursOnHoliday {
        date: NaiveDate,
        holiday_name: String,
    },
    HoursOnWeekend {
        date: NaiveDate,
    },
    HoursOnLeave {
        date: NaiveDate,
        category: LeaveCategory,
    },
    WorkdayUnaccounted {
        date: NaiveDate,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNameMissing { row } => {
                write!(f, "Row {row}: task name required when hours present")
            }
            Self::HoursOutOfRange { row, date } => {
                write!(f, "{date}: invalid hours in row {row}")
            }
            Self::HoursOnHoliday { date, holiday_name } => {
                write!(f, "{date}: entries present on holiday {holiday_name}")
            }
            Self::HoursOnWeekend { date } => {
                write!(f, "{date}: entries present on weekend")
            }
            Self::HoursOnLeave { date, category } => {
                write!(
                    f,
                    "{date}: entries present on approved {} leave",
                    category.as_str()
                )
            }
            Self::WorkdayUnaccounted { date } => {
                write!(f, "{date}: total hours are 0")
            }
        }
    }
}

/// Run every rule over the grid; passes iff the result is empty.
pub fn validate_week(grid: &WeekGrid, reference: &ReferenceCalendar) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, row) in grid.rows.iter().enumerate() {
        let row_no = index + 1;
        if row.has_any_hours() && !row.has_task_name() {
            violations.push(Violation::TaskNameMissing { row: row_no });
        }
        for (date, hours) in &row.hours {
            if *hours < 0.0 || *hours > 24.0 {
                violations.push(Violation::HoursOutOfRange {
                    row: row_no,
                    date: *date,
                });
            }
            if *hours > 0.0 {
                if let Some(holiday) = reference.holiday_on(*date) {
                    violations.push(Violation::HoursOnHoliday {
                        date: *date,
                        holiday_name: holiday.holiday_name.clone(),
                    });
                } else if let Some(leave) = reference.leave_on(*date) {
                    violations.push(Violation::HoursOnLeave {
                        date: *date,
                        category: leave.leave_category,
                    });
                } else if is_weekend(*date) {
                    violations.push(Violation::HoursOnWeekend { date: *date });
                }
            }
        }
    }

    let totals = grid.day_totals();
    for (date, total) in grid.week.dates().into_iter().zip(totals) {
        if reference.is_expected_workday(date) && total <= 0.0 {
            violations.push(Violation::WorkdayUnaccounted { date });
        }
    }

    violations
}

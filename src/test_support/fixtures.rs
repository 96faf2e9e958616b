// Shared fixtures for unit tests across the crate.

use crate::core::model::{
    HolidayCalendarEntry, HolidayType, LeaveCategory, LeaveDay, RecurrenceRule, Role, Session,
    TimesheetEntry, TimesheetStatus,
};
use crate::core::week::WeekWindow;

pub fn week_of(date: &str) -> WeekWindow {
    WeekWindow::containing(date.parse().expect("valid fixture date"))
}

pub fn entry(id: &str, date: &str, hours: f64, task: &str, status: &str) -> TimesheetEntry {
    TimesheetEntry {
        timesheet_id: if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        },
        work_date: date.parse().expect("valid fixture date"),
        hours_worked: hours,
        task_name: task.to_string(),
        task_description: String::new(),
        status: TimesheetStatus::parse(status),
    }
}

pub fn holiday(date: &str, name: &str) -> HolidayCalendarEntry {
    HolidayCalendarEntry {
        holiday_calendar_id: format!("hc-{date}"),
        holiday_name: name.to_string(),
        holiday_date: date.parse().expect("valid fixture date"),
        holiday_type: HolidayType::Public,
        recurrence_rule: RecurrenceRule::Annual,
        location_region: None,
        calendar_country_code: Some("IN".to_string()),
        holiday_active: true,
    }
}

pub fn inactive_holiday(date: &str, name: &str) -> HolidayCalendarEntry {
    HolidayCalendarEntry {
        holiday_active: false,
        ..holiday(date, name)
    }
}

pub fn leave_day(date: &str) -> LeaveDay {
    LeaveDay {
        date: date.parse().expect("valid fixture date"),
        leave_category: LeaveCategory::Casual,
        duration: 1.0,
    }
}

pub fn session() -> Session {
    Session {
        user_id: "emp-fixed-0001".to_string(),
        user_name: "Asha Rao".to_string(),
        role: Role::Employee,
        access_token: "token-fixed".to_string(),
        refresh_token: "refresh-fixed".to_string(),
    }
}


// Normalized view models for the backend's resource families.
//
// Purpose
// - Give the rest of the crate strict types with required vs. optional
//   fields spelled out, so downstream logic never re-checks for absent
//   values. Wire-shape leniency lives in adapters::http::dto only.
//
// Boundaries
// - Plain data. No input or output.

use chrono::NaiveDate;

/// Backend workflow status of a single timesheet entry. The backend
/// stores a free-form string; unrecognized values are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimesheetStatus {
    Draft,
    Pending,
    Submitted,
    Approved,
    Rejected,
    Other(String),
}

impl TimesheetStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "draft" => Self::Draft,
            "pending" => Self::Pending,
            "submitted" => Self::Submitted,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }
}

/// One persisted (or about-to-be-persisted) day of work for a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetEntry {
    /// Absent until the backend has persisted the entry.
    pub timesheet_id: Option<String>,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_name: String,
    pub task_description: String,
    pub status: TimesheetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayType {
    Public,
    Religious,
    Regional,
    CompanySpecific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceRule {
    Annual,
    OneTime,
}

/// Read-only holiday reference data used to flag grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayCalendarEntry {
    pub holiday_calendar_id: String,
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    pub holiday_type: HolidayType,
    pub recurrence_rule: RecurrenceRule,
    pub location_region: Option<String>,
    pub calendar_country_code: Option<String>,
    pub holiday_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveCategory {
    Sick,
    Casual,
    Planned,
    Unplanned,
}

impl LeaveCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sick => "SICK",
            Self::Casual => "CASUAL",
            Self::Planned => "PLANNED",
            Self::Unplanned => "UNPLANNED",
        }
    }
}

/// One day of an approved leave request, expanded per-day.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveDay {
    pub date: NaiveDate,
    pub leave_category: LeaveCategory,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Employee,
    Client,
}

/// Authenticated session produced by login and injected into every
/// backend-facing client. Logout is dropping the value.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
    pub access_token: String,
    pub refresh_token: String,
}

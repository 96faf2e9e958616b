// Wire shapes for the backend's JSON bodies, kept apart from the core
// models so backend quirks never leak inward.
//
// Known quirks handled here
// - Listing returns hours as `workedHours`; create and update take
//   `hoursWorked`. Deserialization accepts either spelling.
// - Identifiers arrive as numbers or strings depending on the endpoint;
//   both normalize to `String`.
// - Status, holiday type, recurrence and leave category are free-form
//   uppercase strings on the wire; unknown values degrade to a sensible
//   default instead of failing the whole fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::core::model::{
    HolidayCalendarEntry, HolidayType, LeaveCategory, LeaveDay, RecurrenceRule, TimesheetEntry,
    TimesheetStatus,
};
use crate::core::reconcile::{CreateDraft, CreatedEntry, UpdateDraft};

pub(crate) fn id_field<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A timesheet record as the view endpoint returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetDto {
    #[serde(default, deserialize_with = "id_field")]
    pub timesheet_id: Option<String>,
    pub work_date: NaiveDate,
    #[serde(default)]
    pub worked_hours: Option<f64>,
    #[serde(default)]
    pub hours_worked: Option<f64>,
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default, alias = "timesheetStatus")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "id_field")]
    pub client_ref: Option<String>,
}

impl TimesheetDto {
    fn effective_hours(&self) -> f64 {
        self.worked_hours.or(self.hours_worked).unwrap_or(0.0)
    }

    pub fn into_entry(self) -> TimesheetEntry {
        let hours_worked = self.effective_hours();
        TimesheetEntry {
            timesheet_id: self.timesheet_id,
            work_date: self.work_date,
            hours_worked,
            task_name: self.task_name.unwrap_or_default(),
            task_description: self.task_description.unwrap_or_default(),
            status: TimesheetStatus::parse(self.status.as_deref().unwrap_or_default()),
        }
    }

    pub fn into_created(self) -> CreatedEntry {
        CreatedEntry {
            timesheet_id: self.timesheet_id.unwrap_or_default(),
            work_date: self.work_date,
            task_name: self.task_name.unwrap_or_default(),
            client_ref: self
                .client_ref
                .as_deref()
                .and_then(|raw| Uuid::parse_str(raw).ok()),
        }
    }
}

/// Body element for the batch register endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimesheetDto {
    pub employee_id: String,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_name: String,
    pub task_description: String,
    pub client_ref: Uuid,
}

impl CreateTimesheetDto {
    pub fn from_draft(employee_id: &str, draft: &CreateDraft) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            work_date: draft.work_date,
            hours_worked: draft.hours_worked,
            task_name: draft.task_name.clone(),
            task_description: draft.task_description.clone(),
            client_ref: draft.client_ref,
        }
    }
}

/// Body element for the per-id update endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimesheetDto {
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_name: String,
    pub task_description: String,
}

impl UpdateTimesheetDto {
    pub fn from_draft(draft: &UpdateDraft) -> Self {
        Self {
            work_date: draft.work_date,
            hours_worked: draft.hours_worked,
            task_name: draft.task_name.clone(),
            task_description: draft.task_description.clone(),
        }
    }
}

fn parse_holiday_type(raw: &str) -> HolidayType {
    match raw.to_ascii_uppercase().as_str() {
        "PUBLIC" => HolidayType::Public,
        "RELIGIOUS" => HolidayType::Religious,
        "REGIONAL" => HolidayType::Regional,
        _ => HolidayType::CompanySpecific,
    }
}

fn parse_recurrence(raw: &str) -> RecurrenceRule {
    match raw.to_ascii_uppercase().as_str() {
        "ANNUAL" => RecurrenceRule::Annual,
        _ => RecurrenceRule::OneTime,
    }
}

fn parse_leave_category(raw: &str) -> LeaveCategory {
    match raw.to_ascii_uppercase().as_str() {
        "SICK" => LeaveCategory::Sick,
        "CASUAL" => LeaveCategory::Casual,
        "PLANNED" => LeaveCategory::Planned,
        _ => LeaveCategory::Unplanned,
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCalendarDto {
    #[serde(default, deserialize_with = "id_field")]
    pub holiday_calendar_id: Option<String>,
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    #[serde(default)]
    pub holiday_type: String,
    #[serde(default)]
    pub recurrence_rule: String,
    #[serde(default)]
    pub location_region: Option<String>,
    #[serde(default)]
    pub calendar_country_code: Option<String>,
    #[serde(default = "default_active")]
    pub holiday_active: bool,
}

fn default_active() -> bool {
    true
}

impl HolidayCalendarDto {
    pub fn into_entry(self) -> HolidayCalendarEntry {
        HolidayCalendarEntry {
            holiday_calendar_id: self.holiday_calendar_id.unwrap_or_default(),
            holiday_name: self.holiday_name,
            holiday_date: self.holiday_date,
            holiday_type: parse_holiday_type(&self.holiday_type),
            recurrence_rule: parse_recurrence(&self.recurrence_rule),
            location_region: self.location_region,
            calendar_country_code: self.calendar_country_code,
            holiday_active: self.holiday_active,
        }
    }
}

/// Body for the holiday calendar register and update endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCalendarUpsertDto {
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    pub holiday_type: String,
    pub recurrence_rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_country_code: Option<String>,
    pub holiday_active: bool,
}

/// One leave request from the employee leave summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestDto {
    #[serde(default, alias = "leaveCategory")]
    pub leave_category_type: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default, alias = "leaveStatus")]
    pub status: String,
    #[serde(default)]
    pub leave_duration: Option<f64>,
}

/// The summary endpoint is paged on newer backends and a bare array on
/// older ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LeaveSummaryResponse {
    Page { content: Vec<LeaveRequestDto> },
    Flat(Vec<LeaveRequestDto>),
}

impl LeaveSummaryResponse {
    pub fn into_requests(self) -> Vec<LeaveRequestDto> {
        match self {
            Self::Page { content } => content,
            Self::Flat(requests) => requests,
        }
    }
}

impl LeaveRequestDto {
    pub fn is_approved(&self) -> bool {
        self.status.eq_ignore_ascii_case("APPROVED")
    }

    /// Expand a request spanning several days into per-day entries, the
    /// total duration split evenly across the span.
    pub fn expand_days(&self) -> Vec<LeaveDay> {
        let span_days = (self.to_date - self.from_date).num_days();
        if span_days < 0 {
            return Vec::new();
        }
        let span = span_days + 1;
        let per_day = self
            .leave_duration
            .map(|total| total / span as f64)
            .unwrap_or(1.0);
        let category = parse_leave_category(&self.leave_category_type);
        self.from_date
            .iter_days()
            .take(span as usize)
            .map(|date| LeaveDay {
                date,
                leave_category: category,
                duration: per_day,
            })
            .collect()
    }
}

#[cfg(test)]
mod dto_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_read_hours_from_either_wire_spelling() {
        let listed: TimesheetDto = serde_json::from_str(
            r#"{"timesheetId":42,"workDate":"2024-01-01","workedHours":7.5,"taskName":"Build","status":"SUBMITTED"}"#,
        )
        .unwrap();
        let created: TimesheetDto = serde_json::from_str(
            r#"{"timesheetId":"ts-9","workDate":"2024-01-02","hoursWorked":4.0}"#,
        )
        .unwrap();

        let listed = listed.into_entry();
        assert_eq!(listed.timesheet_id.as_deref(), Some("42"));
        assert_eq!(listed.hours_worked, 7.5);
        assert_eq!(listed.status, TimesheetStatus::Submitted);

        let created = created.into_entry();
        assert_eq!(created.timesheet_id.as_deref(), Some("ts-9"));
        assert_eq!(created.hours_worked, 4.0);
        assert_eq!(created.status, TimesheetStatus::Draft);
    }

    #[rstest]
    fn it_should_carry_the_echoed_client_ref_into_the_created_record() {
        let reference = Uuid::now_v7();
        let raw = format!(
            r#"{{"timesheetId":7,"workDate":"2024-01-01","taskName":"Build","clientRef":"{reference}"}}"#
        );
        let dto: TimesheetDto = serde_json::from_str(&raw).unwrap();
        let created = dto.into_created();
        assert_eq!(created.timesheet_id, "7");
        assert_eq!(created.client_ref, Some(reference));
    }

    #[rstest]
    #[case("PUBLIC", HolidayType::Public)]
    #[case("regional", HolidayType::Regional)]
    #[case("SOMETHING_NEW", HolidayType::CompanySpecific)]
    fn it_should_normalize_holiday_types(#[case] raw: &str, #[case] expected: HolidayType) {
        assert_eq!(parse_holiday_type(raw), expected);
    }

    #[rstest]
    fn it_should_expand_a_leave_span_and_split_its_duration() {
        let dto: LeaveRequestDto = serde_json::from_str(
            r#"{"leaveCategoryType":"PLANNED","fromDate":"2024-03-04","toDate":"2024-03-06","status":"APPROVED","leaveDuration":3.0}"#,
        )
        .unwrap();
        assert!(dto.is_approved());
        let days = dto.expand_days();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(days[2].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert!(days.iter().all(|d| d.duration == 1.0));
        assert!(days.iter().all(|d| d.leave_category == LeaveCategory::Planned));
    }

    #[rstest]
    fn it_should_default_a_single_day_leave_without_duration_to_one() {
        let dto: LeaveRequestDto = serde_json::from_str(
            r#"{"leaveCategoryType":"SICK","fromDate":"2024-03-04","toDate":"2024-03-04","status":"PENDING"}"#,
        )
        .unwrap();
        assert!(!dto.is_approved());
        let days = dto.expand_days();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].duration, 1.0);
    }

    #[rstest]
    fn it_should_accept_both_paged_and_flat_leave_summaries() {
        let paged: LeaveSummaryResponse = serde_json::from_str(
            r#"{"content":[{"leaveCategoryType":"CASUAL","fromDate":"2024-05-01","toDate":"2024-05-01","status":"APPROVED"}],"totalPages":1}"#,
        )
        .unwrap();
        let flat: LeaveSummaryResponse = serde_json::from_str(
            r#"[{"leaveCategoryType":"CASUAL","fromDate":"2024-05-01","toDate":"2024-05-01","status":"APPROVED"}]"#,
        )
        .unwrap();
        assert_eq!(paged.into_requests().len(), 1);
        assert_eq!(flat.into_requests().len(), 1);
    }
}

// REST implementations of the read-only reference ports: the holiday
// calendar and the approved-leave summary.
//
// The leave summary returns whole requests; expansion into per-day
// values happens here so the core only ever sees `LeaveDay`.

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::{HolidayCalendarDto, LeaveSummaryResponse};
use crate::core::model::{HolidayCalendarEntry, LeaveDay, Session};
use crate::core::ports::{GatewayError, HolidayDirectory, LeaveDirectory};

pub struct HolidayCalendarClient {
    rest: RestClient,
}

impl HolidayCalendarClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl HolidayDirectory for HolidayCalendarClient {
    async fn active_holidays(&self) -> Result<Vec<HolidayCalendarEntry>, GatewayError> {
        let records: Option<Vec<HolidayCalendarDto>> =
            self.rest.get("/holidays/view/calendar", &[]).await?;
        let holidays: Vec<_> = records
            .unwrap_or_default()
            .into_iter()
            .map(HolidayCalendarDto::into_entry)
            .filter(|h| h.holiday_active)
            .collect();
        debug!(count = holidays.len(), "fetched active holidays");
        Ok(holidays)
    }
}

pub struct LeaveSummaryClient {
    rest: RestClient,
    employee_id: String,
}

impl LeaveSummaryClient {
    pub fn new(rest: RestClient, session: &Session) -> Self {
        Self {
            rest,
            employee_id: session.user_id.clone(),
        }
    }
}

#[async_trait]
impl LeaveDirectory for LeaveSummaryClient {
    async fn approved_leave_days(&self, year: i32) -> Result<Vec<LeaveDay>, GatewayError> {
        let query = [
            ("employeeId", self.employee_id.clone()),
            ("fromDate", format!("{year}-01-01")),
            ("toDate", format!("{year}-12-31")),
            ("status", "APPROVED".to_string()),
        ];
        let summary: Option<LeaveSummaryResponse> =
            self.rest.get("/leave/view/summary", &query).await?;
        let days: Vec<_> = summary
            .map(LeaveSummaryResponse::into_requests)
            .unwrap_or_default()
            .into_iter()
            // The status filter is also applied server-side; kept here
            // because older backends ignore the query parameter.
            .filter(|request| request.is_approved())
            .flat_map(|request| request.expand_days())
            .collect();
        debug!(count = days.len(), year, "expanded approved leave days");
        Ok(days)
    }
}

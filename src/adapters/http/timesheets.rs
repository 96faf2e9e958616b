// REST implementation of the timesheet gateway.
//
// Endpoint map
// - GET    /employee/view/timesheet?startDate=..&endDate=..
// - POST   /employee/timesheet/register            (array body)
// - PUT    /employee/timesheet/update?timesheetIds=<id>  (single-element array body)
// - DELETE /employee/timesheet/delete?timesheetId=<id>
// - GET    /employee/timesheet/approvaltomanager?timesheetIds=..&timesheetIds=..
//
// The approval endpoint mutates state over GET and repeats its query
// parameter once per id; both oddities are the backend's contract.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::{CreateTimesheetDto, TimesheetDto, UpdateTimesheetDto};
use crate::core::model::{Session, TimesheetEntry};
use crate::core::ports::{GatewayError, TimesheetGateway};
use crate::core::reconcile::{CreateDraft, CreatedEntry, UpdateDraft};

pub struct TimesheetClient {
    rest: RestClient,
    employee_id: String,
}

impl TimesheetClient {
    pub fn new(rest: RestClient, session: &Session) -> Self {
        Self {
            rest,
            employee_id: session.user_id.clone(),
        }
    }
}

#[async_trait]
impl TimesheetGateway for TimesheetClient {
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimesheetEntry>, GatewayError> {
        let query = [
            ("startDate", start.to_string()),
            ("endDate", end.to_string()),
        ];
        let records: Option<Vec<TimesheetDto>> =
            self.rest.get("/employee/view/timesheet", &query).await?;
        let entries: Vec<_> = records
            .unwrap_or_default()
            .into_iter()
            .map(TimesheetDto::into_entry)
            .collect();
        debug!(count = entries.len(), %start, %end, "fetched timesheets");
        Ok(entries)
    }

    async fn create_batch(
        &self,
        drafts: &[CreateDraft],
    ) -> Result<Vec<CreatedEntry>, GatewayError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let body: Vec<CreateTimesheetDto> = drafts
            .iter()
            .map(|draft| CreateTimesheetDto::from_draft(&self.employee_id, draft))
            .collect();
        let records: Option<Vec<TimesheetDto>> = self
            .rest
            .post("/employee/timesheet/register", &[], &body)
            .await?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(TimesheetDto::into_created)
            .collect())
    }

    async fn update(&self, draft: &UpdateDraft) -> Result<(), GatewayError> {
        let query = [("timesheetIds", draft.timesheet_id.clone())];
        let body = [UpdateTimesheetDto::from_draft(draft)];
        let _: Option<Value> = self
            .rest
            .put("/employee/timesheet/update", &query, &body)
            .await?;
        Ok(())
    }

    async fn delete(&self, timesheet_id: &str) -> Result<(), GatewayError> {
        let query = [("timesheetId", timesheet_id.to_string())];
        let _: Option<Value> = self
            .rest
            .delete("/employee/timesheet/delete", &query)
            .await?;
        Ok(())
    }

    async fn submit_for_approval(&self, timesheet_ids: &[String]) -> Result<(), GatewayError> {
        if timesheet_ids.is_empty() {
            return Ok(());
        }
        let query: Vec<(&str, String)> = timesheet_ids
            .iter()
            .map(|id| ("timesheetIds", id.clone()))
            .collect();
        let _: Option<Value> = self
            .rest
            .get("/employee/timesheet/approvaltomanager", &query)
            .await?;
        Ok(())
    }
}

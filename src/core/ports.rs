// Ports define what the register needs from the backend, without
// implementing it.
//
// Purpose
// - Describe the external REST backend as abstract capabilities so the
//   application layer stays independent of the transport.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits
//   in the adapters layer.
//
// Testing guidance
// - Use the in memory implementations for tests and local development.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::core::model::{HolidayCalendarEntry, LeaveDay, TimesheetEntry};
use crate::core::reconcile::{CreateDraft, CreatedEntry, UpdateDraft};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend answered but flagged the operation as failed
    /// (`flag == false`), regardless of HTTP status.
    #[error("backend rejected ({status}): {message}")]
    Rejected { status: i64, message: String },

    /// The request never produced a usable envelope.
    #[error("transport error: {0}")]
    Transport(String),
}

/// The timesheet resource family of the backend.
#[async_trait]
pub trait TimesheetGateway: Send + Sync {
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimesheetEntry>, GatewayError>;

    /// Batch create; returns the created records with backend-assigned
    /// ids, echoing each draft's correlation id when supported.
    async fn create_batch(
        &self,
        drafts: &[CreateDraft],
    ) -> Result<Vec<CreatedEntry>, GatewayError>;

    async fn update(&self, draft: &UpdateDraft) -> Result<(), GatewayError>;

    async fn delete(&self, timesheet_id: &str) -> Result<(), GatewayError>;

    async fn submit_for_approval(&self, timesheet_ids: &[String]) -> Result<(), GatewayError>;
}

/// Read-only holiday reference data.
#[async_trait]
pub trait HolidayDirectory: Send + Sync {
    async fn active_holidays(&self) -> Result<Vec<HolidayCalendarEntry>, GatewayError>;
}

/// Read-only approved-leave reference data, expanded per day.
#[async_trait]
pub trait LeaveDirectory: Send + Sync {
    async fn approved_leave_days(&self, year: i32) -> Result<Vec<LeaveDay>, GatewayError>;
}

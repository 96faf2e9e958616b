// The Timesheet Register: composes weekly grid state from the
// timesheet, holiday and leave ports, applies local validation and
// reconciliation, and persists through the gateway on explicit save.
//
// Responsibilities
// - Own the in-memory grid, reference calendar and notice feed for the
//   selected week.
// - Execute the save plan: batched creates first (so new ids can be
//   merged into state), then sequential per-id updates tolerating
//   partial failure, then an unconditional refetch to resync with
//   server truth.
// - Guard submit-for-approval behind validation and the week lock.
//
// Boundaries
// - All backend interaction goes through the ports; no transport code.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::application::errors::ApplicationError;
use crate::application::notices::{Notice, NoticeFeed};
use crate::core::grid::WeekGrid;
use crate::core::model::Session;
use crate::core::ports::{HolidayDirectory, LeaveDirectory, TimesheetGateway};
use crate::core::reconcile::{merge_created, plan_save};
use crate::core::reference::ReferenceCalendar;
use crate::core::validate::validate_week;
use crate::core::week::WeekWindow;

pub struct TimesheetRegister<G, H, L>
where
    G: TimesheetGateway,
    H: HolidayDirectory,
    L: LeaveDirectory,
{
    session: Session,
    gateway: Arc<G>,
    holidays: Arc<H>,
    leaves: Arc<L>,
    week: WeekWindow,
    grid: WeekGrid,
    reference: ReferenceCalendar,
    notices: NoticeFeed,
}

impl<G, H, L> TimesheetRegister<G, H, L>
where
    G: TimesheetGateway,
    H: HolidayDirectory,
    L: LeaveDirectory,
{
    pub fn new(
        session: Session,
        gateway: Arc<G>,
        holidays: Arc<H>,
        leaves: Arc<L>,
        week: WeekWindow,
    ) -> Self {
        Self {
            session,
            gateway,
            holidays,
            leaves,
            grid: WeekGrid::empty(week),
            week,
            reference: ReferenceCalendar::default(),
            notices: NoticeFeed::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn week(&self) -> WeekWindow {
        self.week
    }

    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    pub fn reference(&self) -> &ReferenceCalendar {
        &self.reference
    }

    pub fn is_locked(&self) -> bool {
        self.grid.is_locked()
    }

    /// Drain the user-visible messages accumulated by operations.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    /// Load grid and reference data for the current week. A timesheet
    /// fetch failure leaves the grid unchanged (lock reset); reference
    /// fetch failures are tolerated with their own notice.
    pub async fn load_week(&mut self) -> Result<(), ApplicationError> {
        debug!(
            user_id = %self.session.user_id,
            start = %self.week.start(),
            "loading week"
        );
        match self.holidays.active_holidays().await {
            Ok(holidays) => self.reference.set_holidays(holidays),
            Err(err) => {
                warn!(error = %err, "failed to fetch holidays");
                self.notices.error("Failed to fetch holidays");
            }
        }
        match self.leaves.approved_leave_days(self.week.year()).await {
            Ok(leaves) => self.reference.set_leaves(leaves),
            Err(err) => {
                warn!(error = %err, "failed to fetch leaves");
                self.notices.error("Failed to fetch leaves");
            }
        }
        self.refetch_grid().await
    }

    /// Snap `date` to its Monday and reload everything for that week.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<(), ApplicationError> {
        self.week = WeekWindow::containing(date);
        self.grid = WeekGrid::empty(self.week);
        self.load_week().await
    }

    // Local-only cell mutations; the grid silently rejects them while
    // locked, and no server call happens until an explicit save.

    pub fn set_hours(&mut self, row: usize, date: NaiveDate, hours: f64) {
        self.grid.set_hours(row, date, hours);
    }

    pub fn set_task_name(&mut self, row: usize, name: impl Into<String>) {
        self.grid.set_task_name(row, name);
    }

    pub fn add_row(&mut self) {
        self.grid.add_row();
    }

    /// Diff the grid against known persisted ids and issue the minimal
    /// create/update calls, then refetch to reconcile with server truth.
    pub async fn save(&mut self) -> Result<(), ApplicationError> {
        if self.grid.is_locked() {
            self.notices.info("Timesheet is locked");
            return Ok(());
        }

        let plan = plan_save(&self.grid);
        debug!(
            creates = plan.creates.len(),
            updates = plan.updates.len(),
            "executing save plan"
        );

        if !plan.creates.is_empty() {
            match self.gateway.create_batch(&plan.creates).await {
                Ok(created) => merge_created(&mut self.grid, &plan, &created),
                Err(err) => {
                    warn!(error = %err, "create batch failed");
                    self.notices.error("Save failed");
                    return Err(err.into());
                }
            }
        }

        // Sequential on purpose: created ids are merged before updates
        // run, and a failed update must not abort its siblings.
        for update in &plan.updates {
            if let Err(err) = self.gateway.update(update).await {
                warn!(
                    timesheet_id = %update.timesheet_id,
                    error = %err,
                    "update failed"
                );
            }
        }

        self.refetch_grid().await?;
        self.notices.success("Save successful");
        Ok(())
    }

    /// Validate, save, then submit every persisted positive-hour cell
    /// for manager approval. Refused client-side while locked.
    pub async fn submit_for_approval(&mut self) -> Result<(), ApplicationError> {
        if self.grid.is_locked() {
            self.notices.info("Already submitted");
            return Ok(());
        }

        let violations = validate_week(&self.grid, &self.reference);
        if !violations.is_empty() {
            for violation in &violations {
                self.notices.error(violation.to_string());
            }
            return Err(ApplicationError::Validation(violations));
        }

        self.save().await?;

        let ids = self.grid.submittable_ids();
        if ids.is_empty() {
            self.notices.info("No timesheet entries to submit");
            return Ok(());
        }

        if let Err(err) = self.gateway.submit_for_approval(&ids).await {
            warn!(error = %err, "submit failed");
            self.notices.error("Submit failed");
            return Err(err.into());
        }

        self.grid.set_locked(true);
        self.notices.success("Submitted for approval");
        if let Err(err) = self.refetch_grid().await {
            warn!(error = %err, "refetch after submit failed");
        }
        Ok(())
    }

    /// Optimistically remove a row, then delete its persisted entries.
    /// Any backend failure rolls the row back and skips the refetch.
    pub async fn delete_row(&mut self, index: usize) -> Result<(), ApplicationError> {
        if self.grid.is_locked() {
            self.notices.info("Timesheet is locked");
            return Ok(());
        }
        let Some(row) = self.grid.take_row(index) else {
            return Ok(());
        };

        let ids: Vec<String> = row.timesheet_ids.values().cloned().collect();
        for id in &ids {
            if let Err(err) = self.gateway.delete(id).await {
                warn!(timesheet_id = %id, error = %err, "delete failed, rolling back");
                self.grid.restore_row(index, row.clone());
                self.notices.error("Delete failed - changes rolled back");
                return Err(err.into());
            }
        }

        if ids.is_empty() {
            self.notices.success("Unsaved row deleted");
        } else {
            if let Err(err) = self.refetch_grid().await {
                warn!(error = %err, "refetch after delete failed");
            }
            self.notices.success("Row and entries deleted successfully");
        }
        Ok(())
    }

    /// Re-fetch the week's entries and rebuild the grid from server
    /// truth. On failure the previous grid survives, minus the lock.
    async fn refetch_grid(&mut self) -> Result<(), ApplicationError> {
        match self
            .gateway
            .fetch_range(self.week.start(), self.week.end())
            .await
        {
            Ok(entries) => {
                self.grid = WeekGrid::build(self.week, &entries);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch timesheets");
                self.notices.error("Failed to fetch timesheets");
                self.grid.set_locked(false);
                Err(err.into())
            }
        }
    }
}

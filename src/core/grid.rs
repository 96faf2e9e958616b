// Week grid state: task rows built from persisted entries, mutated
// locally until an explicit save reconciles them with the backend.
//
// Purpose
// - Group a week's fetched entries by task name into TaskRow aggregates.
// - Apply single-cell edits in memory, tracking dirtiness per row.
//
// Boundaries
// - No input or output. Fetching and saving live in application::register.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::model::{TimesheetEntry, TimesheetStatus};
use crate::core::week::WeekWindow;

pub const UNTITLED_TASK: &str = "Untitled";

/// Client-only aggregate: one task name plus this week's hours per date.
/// `timesheet_ids` is sparse; only dates with a persisted entry carry one.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub row_id: Uuid,
    pub task_name: String,
    pub hours: BTreeMap<NaiveDate, f64>,
    pub timesheet_ids: BTreeMap<NaiveDate, String>,
    pub dirty: bool,
}

impl TaskRow {
    /// A fresh editable row with every date of the week zeroed.
    pub fn blank(week: &WeekWindow) -> Self {
        Self {
            row_id: Uuid::now_v7(),
            task_name: String::new(),
            hours: week.dates().into_iter().map(|d| (d, 0.0)).collect(),
            timesheet_ids: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Hours for `date`, treating never-present dates as 0.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.hours.get(&date).copied().unwrap_or(0.0)
    }

    pub fn has_any_hours(&self) -> bool {
        self.hours.values().any(|h| *h > 0.0)
    }

    pub fn has_task_name(&self) -> bool {
        !self.task_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub week: WeekWindow,
    pub rows: Vec<TaskRow>,
    locked: bool,
}

impl WeekGrid {
    /// Build the in-memory grid from the entries fetched for the week.
    ///
    /// Entries sharing a task name collapse into one row ("Untitled" when
    /// blank). A week with no entries still gets one blank row so the
    /// grid is never empty. The lock flag is true iff the fetched list is
    /// non-empty and every entry is `Submitted`.
    pub fn build(week: WeekWindow, entries: &[TimesheetEntry]) -> Self {
        let locked = !entries.is_empty()
            && entries
                .iter()
                .all(|e| e.status == TimesheetStatus::Submitted);

        let mut grouped: BTreeMap<String, TaskRow> = BTreeMap::new();
        for entry in entries {
            let task = if entry.task_name.trim().is_empty() {
                UNTITLED_TASK.to_string()
            } else {
                entry.task_name.clone()
            };
            let row = grouped.entry(task.clone()).or_insert_with(|| TaskRow {
                row_id: Uuid::now_v7(),
                task_name: task,
                hours: BTreeMap::new(),
                timesheet_ids: BTreeMap::new(),
                dirty: false,
            });
            row.hours.insert(entry.work_date, entry.hours_worked);
            if let Some(id) = &entry.timesheet_id {
                row.timesheet_ids.insert(entry.work_date, id.clone());
            }
        }

        let mut rows: Vec<TaskRow> = grouped.into_values().collect();
        if rows.is_empty() {
            rows.push(TaskRow::blank(&week));
        }

        Self { week, rows, locked }
    }

    pub fn empty(week: WeekWindow) -> Self {
        Self::build(week, &[])
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Apply a single-cell hours edit. Rejected silently while locked.
    pub fn set_hours(&mut self, row: usize, date: NaiveDate, hours: f64) {
        if self.locked {
            return;
        }
        if let Some(task_row) = self.rows.get_mut(row) {
            task_row.hours.insert(date, hours);
            task_row.dirty = true;
        }
    }

    /// Rename a row's task. Rejected silently while locked.
    pub fn set_task_name(&mut self, row: usize, name: impl Into<String>) {
        if self.locked {
            return;
        }
        if let Some(task_row) = self.rows.get_mut(row) {
            task_row.task_name = name.into();
            task_row.dirty = true;
        }
    }

    /// Append a blank editable row. Rejected silently while locked.
    pub fn add_row(&mut self) {
        if self.locked {
            return;
        }
        let row = TaskRow::blank(&self.week);
        self.rows.push(row);
    }

    /// Remove a row for optimistic deletion; the caller keeps the
    /// returned row so it can be reinserted on backend failure.
    pub(crate) fn take_row(&mut self, row: usize) -> Option<TaskRow> {
        if self.locked || row >= self.rows.len() {
            return None;
        }
        Some(self.rows.remove(row))
    }

    /// Rollback counterpart of [`WeekGrid::take_row`].
    pub(crate) fn restore_row(&mut self, index: usize, row: TaskRow) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
    }

    /// Total hours per day across all rows, in week-date order.
    pub fn day_totals(&self) -> [f64; 7] {
        let dates = self.week.dates();
        std::array::from_fn(|i| self.rows.iter().map(|r| r.hours_on(dates[i])).sum())
    }

    /// Ids of persisted cells that still carry positive hours; the set
    /// submitted for approval.
    pub fn submittable_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for row in &self.rows {
            for (date, id) in &row.timesheet_ids {
                if row.hours_on(*date) > 0.0 {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }
}

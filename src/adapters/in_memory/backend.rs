// In memory implementation of the backend ports.
//
// Purpose
// - Support register tests and local development without the REST
//   backend.
//
// Responsibilities
// - Store timesheet entries, holidays and leave days in memory.
// - Offer failure injection (offline transport, per-id update/delete
//   rejections, suppressed correlation-id echo) and per-operation call
//   counters so tests can assert idempotence and "no network call"
//   properties.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::model::{HolidayCalendarEntry, LeaveDay, TimesheetEntry, TimesheetStatus};
use crate::core::ports::{GatewayError, HolidayDirectory, LeaveDirectory, TimesheetGateway};
use crate::core::reconcile::{CreateDraft, CreatedEntry, UpdateDraft};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub fetches: u32,
    pub creates: u32,
    pub updates: u32,
    pub deletes: u32,
    pub submits: u32,
}

#[derive(Default)]
struct Inner {
    entries: BTreeMap<String, TimesheetEntry>,
    holidays: Vec<HolidayCalendarEntry>,
    leaves: Vec<LeaveDay>,
    offline: bool,
    suppress_client_ref_echo: bool,
    failing_updates: BTreeSet<String>,
    failing_deletes: BTreeSet<String>,
    calls: CallCounts,
}

#[derive(Default)]
pub struct InMemoryBackend {
    inner: RwLock<Inner>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_entry(&self, entry: TimesheetEntry) -> String {
        let mut g = self.inner.write().await;
        let id = entry
            .timesheet_id
            .clone()
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        let mut stored = entry;
        stored.timesheet_id = Some(id.clone());
        g.entries.insert(id.clone(), stored);
        id
    }

    pub async fn seed_holiday(&self, holiday: HolidayCalendarEntry) {
        self.inner.write().await.holidays.push(holiday);
    }

    pub async fn seed_leave(&self, leave: LeaveDay) {
        self.inner.write().await.leaves.push(leave);
    }

    /// Simulate a dead backend: every call fails at the transport layer.
    pub async fn set_offline(&self, offline: bool) {
        self.inner.write().await.offline = offline;
    }

    /// Emulate backend builds that never echo the correlation id, which
    /// forces the legacy task-name merge.
    pub async fn suppress_client_ref_echo(&self) {
        self.inner.write().await.suppress_client_ref_echo = true;
    }

    pub async fn fail_update_for(&self, timesheet_id: impl Into<String>) {
        self.inner
            .write()
            .await
            .failing_updates
            .insert(timesheet_id.into());
    }

    pub async fn fail_delete_for(&self, timesheet_id: impl Into<String>) {
        self.inner
            .write()
            .await
            .failing_deletes
            .insert(timesheet_id.into());
    }

    pub async fn calls(&self) -> CallCounts {
        self.inner.read().await.calls
    }

    pub async fn entry(&self, timesheet_id: &str) -> Option<TimesheetEntry> {
        self.inner.read().await.entries.get(timesheet_id).cloned()
    }

    pub async fn entry_count(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    fn ensure_online(inner: &Inner) -> Result<(), GatewayError> {
        if inner.offline {
            Err(GatewayError::Transport("backend offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TimesheetGateway for InMemoryBackend {
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimesheetEntry>, GatewayError> {
        let mut g = self.inner.write().await;
        g.calls.fetches += 1;
        Self::ensure_online(&g)?;
        let mut entries: Vec<TimesheetEntry> = g
            .entries
            .values()
            .filter(|e| e.work_date >= start && e.work_date <= end)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            (a.work_date, &a.task_name).cmp(&(b.work_date, &b.task_name))
        });
        Ok(entries)
    }

    async fn create_batch(
        &self,
        drafts: &[CreateDraft],
    ) -> Result<Vec<CreatedEntry>, GatewayError> {
        let mut g = self.inner.write().await;
        g.calls.creates += 1;
        Self::ensure_online(&g)?;
        if drafts.is_empty() {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "empty create batch".to_string(),
            });
        }
        let suppress = g.suppress_client_ref_echo;
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = Uuid::now_v7().to_string();
            g.entries.insert(
                id.clone(),
                TimesheetEntry {
                    timesheet_id: Some(id.clone()),
                    work_date: draft.work_date,
                    hours_worked: draft.hours_worked,
                    task_name: draft.task_name.clone(),
                    task_description: draft.task_description.clone(),
                    status: TimesheetStatus::Draft,
                },
            );
            created.push(CreatedEntry {
                timesheet_id: id,
                work_date: draft.work_date,
                task_name: draft.task_name.clone(),
                client_ref: if suppress { None } else { Some(draft.client_ref) },
            });
        }
        Ok(created)
    }

    async fn update(&self, draft: &UpdateDraft) -> Result<(), GatewayError> {
        let mut g = self.inner.write().await;
        g.calls.updates += 1;
        Self::ensure_online(&g)?;
        if g.failing_updates.contains(&draft.timesheet_id) {
            return Err(GatewayError::Rejected {
                status: 500,
                message: format!("update rejected for {}", draft.timesheet_id),
            });
        }
        match g.entries.get_mut(&draft.timesheet_id) {
            Some(entry) => {
                entry.work_date = draft.work_date;
                entry.hours_worked = draft.hours_worked;
                entry.task_name = draft.task_name.clone();
                entry.task_description = draft.task_description.clone();
                Ok(())
            }
            None => Err(GatewayError::Rejected {
                status: 404,
                message: format!("no timesheet {}", draft.timesheet_id),
            }),
        }
    }

    async fn delete(&self, timesheet_id: &str) -> Result<(), GatewayError> {
        let mut g = self.inner.write().await;
        g.calls.deletes += 1;
        Self::ensure_online(&g)?;
        if g.failing_deletes.contains(timesheet_id) {
            return Err(GatewayError::Rejected {
                status: 500,
                message: format!("delete rejected for {timesheet_id}"),
            });
        }
        match g.entries.remove(timesheet_id) {
            Some(_) => Ok(()),
            None => Err(GatewayError::Rejected {
                status: 404,
                message: format!("no timesheet {timesheet_id}"),
            }),
        }
    }

    async fn submit_for_approval(&self, timesheet_ids: &[String]) -> Result<(), GatewayError> {
        let mut g = self.inner.write().await;
        g.calls.submits += 1;
        Self::ensure_online(&g)?;
        if timesheet_ids.is_empty() {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "at least one timesheet id is required".to_string(),
            });
        }
        for id in timesheet_ids {
            match g.entries.get_mut(id) {
                Some(entry) => entry.status = TimesheetStatus::Submitted,
                None => {
                    return Err(GatewayError::Rejected {
                        status: 404,
                        message: format!("no timesheet {id}"),
                    });
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl HolidayDirectory for InMemoryBackend {
    async fn active_holidays(&self) -> Result<Vec<HolidayCalendarEntry>, GatewayError> {
        let g = self.inner.read().await;
        Self::ensure_online(&g)?;
        Ok(g.holidays.clone())
    }
}

#[async_trait]
impl LeaveDirectory for InMemoryBackend {
    async fn approved_leave_days(&self, year: i32) -> Result<Vec<LeaveDay>, GatewayError> {
        let g = self.inner.read().await;
        Self::ensure_online(&g)?;
        Ok(g.leaves
            .iter()
            .filter(|l| l.date.year() == year)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod in_memory_backend_tests {
    use super::*;
    use crate::test_support::fixtures::entry;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_assign_ids_on_create_and_echo_the_client_ref() {
        let backend = InMemoryBackend::new();
        let draft = CreateDraft {
            client_ref: Uuid::now_v7(),
            work_date: date("2024-01-01"),
            hours_worked: 8.0,
            task_name: "Build".to_string(),
            task_description: String::new(),
        };
        let created = backend.create_batch(&[draft.clone()]).await.unwrap();
        assert_eq!(created.len(), 1);
        assert!(!created[0].timesheet_id.is_empty());
        assert_eq!(created[0].client_ref, Some(draft.client_ref));
        assert_eq!(backend.entry_count().await, 1);

        let stored = backend.entry(&created[0].timesheet_id).await.unwrap();
        assert_eq!(stored.status, TimesheetStatus::Draft);
        assert_eq!(stored.hours_worked, 8.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_filter_fetches_to_the_requested_range() {
        let backend = InMemoryBackend::new();
        backend
            .seed_entry(entry("ts-1", "2024-01-01", 8.0, "Build", "Draft"))
            .await;
        backend
            .seed_entry(entry("ts-2", "2024-01-10", 8.0, "Build", "Draft"))
            .await;
        let fetched = backend
            .fetch_range(date("2024-01-01"), date("2024-01-07"))
            .await
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].timesheet_id.as_deref(), Some("ts-1"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_every_call_while_offline() {
        let backend = InMemoryBackend::new();
        backend.set_offline(true).await;
        let result = backend
            .fetch_range(date("2024-01-01"), date("2024-01-07"))
            .await;
        assert_eq!(
            result.unwrap_err(),
            GatewayError::Transport("backend offline".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_mark_submitted_entries_and_count_calls() {
        let backend = InMemoryBackend::new();
        let id = backend
            .seed_entry(entry("ts-1", "2024-01-01", 8.0, "Build", "Draft"))
            .await;
        backend.submit_for_approval(&[id.clone()]).await.unwrap();
        assert_eq!(
            backend.entry(&id).await.unwrap().status,
            TimesheetStatus::Submitted
        );
        let calls = backend.calls().await;
        assert_eq!(calls.submits, 1);
        assert_eq!(calls.fetches, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_injected_update_and_delete_failures() {
        let backend = InMemoryBackend::new();
        let id = backend
            .seed_entry(entry("ts-1", "2024-01-01", 8.0, "Build", "Draft"))
            .await;
        backend.fail_update_for(&id).await;
        backend.fail_delete_for(&id).await;

        let update = UpdateDraft {
            timesheet_id: id.clone(),
            work_date: date("2024-01-01"),
            hours_worked: 6.0,
            task_name: "Build".to_string(),
            task_description: String::new(),
        };
        assert!(backend.update(&update).await.is_err());
        assert!(backend.delete(&id).await.is_err());
        // The entry survives the failed delete.
        assert!(backend.entry(&id).await.is_some());
    }
}

// Save planning: diff the in-memory grid against known persisted ids
// and produce the minimal create/update batches.
//
// Purpose
// - Keep the reconciliation rules pure and testable; the application
//   layer only executes the plan against the gateway.
//
// Notes
// - Zeroed or task-less cells are never submitted, even when they carry
//   a persisted id. The stale backend record survives until the row
//   itself is deleted; a deliberate, known asymmetry of the system.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::grid::WeekGrid;

/// A cell to be created. `client_ref` is generated here so the created
/// record can be matched back to its cell when the backend echoes it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDraft {
    pub client_ref: Uuid,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_name: String,
    pub task_description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDraft {
    pub timesheet_id: String,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_name: String,
    pub task_description: String,
}

/// A record the backend reports as created. `client_ref` is optional;
/// older backend builds do not echo it back.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedEntry {
    pub timesheet_id: String,
    pub work_date: NaiveDate,
    pub task_name: String,
    pub client_ref: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavePlan {
    pub creates: Vec<CreateDraft>,
    pub updates: Vec<UpdateDraft>,
}

impl SavePlan {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty()
    }
}

/// Walk every (row, date) cell and sort it into the create batch, the
/// update batch, or a skip:
/// - hours <= 0 or blank task name: never submitted;
/// - no persisted id: create;
/// - persisted id on a dirty row: update (deduplicated by id);
/// - persisted id on a clean row: no-op.
pub fn plan_save(grid: &WeekGrid) -> SavePlan {
    let mut creates = Vec::new();
    let mut updates: BTreeMap<String, UpdateDraft> = BTreeMap::new();

    for row in &grid.rows {
        if !row.has_task_name() {
            continue;
        }
        for (date, hours) in &row.hours {
            if *hours <= 0.0 {
                continue;
            }
            match row.timesheet_ids.get(date) {
                None => creates.push(CreateDraft {
                    client_ref: Uuid::now_v7(),
                    work_date: *date,
                    hours_worked: *hours,
                    task_name: row.task_name.clone(),
                    task_description: String::new(),
                }),
                Some(id) if row.dirty => {
                    updates.insert(
                        id.clone(),
                        UpdateDraft {
                            timesheet_id: id.clone(),
                            work_date: *date,
                            hours_worked: *hours,
                            task_name: row.task_name.clone(),
                            task_description: String::new(),
                        },
                    );
                }
                Some(_) => {}
            }
        }
    }

    SavePlan {
        creates,
        updates: updates.into_values().collect(),
    }
}

/// Merge backend-assigned ids for created records back into the grid.
///
/// Preferred match is the echoed `client_ref`; the legacy task-name
/// match remains as a fallback for backends that drop it. The legacy
/// match picks the first row with that task name, so two rows sharing a
/// name can be misattributed; the reconciling refetch right after save
/// corrects any such drift.
pub fn merge_created(grid: &mut WeekGrid, plan: &SavePlan, created: &[CreatedEntry]) {
    for record in created {
        if record.timesheet_id.is_empty() {
            continue;
        }
        let by_ref = record.client_ref.and_then(|client_ref| {
            plan.creates
                .iter()
                .find(|draft| draft.client_ref == client_ref)
                .map(|draft| draft.task_name.clone())
        });
        let task_name = by_ref.unwrap_or_else(|| record.task_name.clone());
        if let Some(row) = grid.rows.iter_mut().find(|r| r.task_name == task_name) {
            row.timesheet_ids
                .insert(record.work_date, record.timesheet_id.clone());
        }
    }
}


#[cfg(test)]
mod merge_created_tests {
    use super::*;
    use crate::core::week::WeekWindow;
    use crate::test_support::fixtures::week_of;
    use rstest::{fixture, rstest};

    #[fixture]
    fn week() -> WeekWindow {
        week_of("2024-01-01")
    }

    fn grid_with_two_rows(week: WeekWindow) -> WeekGrid {
        let mut grid = WeekGrid::empty(week);
        grid.set_task_name(0, "Build");
        grid.set_hours(0, "2024-01-01".parse().unwrap(), 8.0);
        grid.add_row();
        grid.set_task_name(1, "Review");
        grid.set_hours(1, "2024-01-02".parse().unwrap(), 4.0);
        grid
    }

    #[rstest]
    fn it_should_merge_ids_by_echoed_client_ref(week: WeekWindow) {
        let mut grid = grid_with_two_rows(week);
        let plan = plan_save(&grid);
        let created: Vec<CreatedEntry> = plan
            .creates
            .iter()
            .enumerate()
            .map(|(i, draft)| CreatedEntry {
                timesheet_id: format!("ts-{i}"),
                work_date: draft.work_date,
                // Deliberately wrong name: client_ref must win.
                task_name: "Mislabeled".to_string(),
                client_ref: Some(draft.client_ref),
            })
            .collect();

        merge_created(&mut grid, &plan, &created);
        assert_eq!(
            grid.rows[0].timesheet_ids.get(&"2024-01-01".parse().unwrap()),
            Some(&"ts-0".to_string())
        );
        assert_eq!(
            grid.rows[1].timesheet_ids.get(&"2024-01-02".parse().unwrap()),
            Some(&"ts-1".to_string())
        );
    }

    #[rstest]
    fn it_should_fall_back_to_task_name_when_no_ref_is_echoed(week: WeekWindow) {
        let mut grid = grid_with_two_rows(week);
        let plan = plan_save(&grid);
        let created = vec![CreatedEntry {
            timesheet_id: "ts-9".to_string(),
            work_date: "2024-01-02".parse().unwrap(),
            task_name: "Review".to_string(),
            client_ref: None,
        }];

        merge_created(&mut grid, &plan, &created);
        assert!(grid.rows[0].timesheet_ids.is_empty());
        assert_eq!(
            grid.rows[1].timesheet_ids.get(&"2024-01-02".parse().unwrap()),
            Some(&"ts-9".to_string())
        );
    }

    #[rstest]
    fn it_should_ignore_created_records_without_an_id(week: WeekWindow) {
        let mut grid = grid_with_two_rows(week);
        let plan = plan_save(&grid);
        let created = vec![CreatedEntry {
            timesheet_id: String::new(),
            work_date: "2024-01-01".parse().unwrap(),
            task_name: "Build".to_string(),
            client_ref: None,
        }];
        merge_created(&mut grid, &plan, &created);
        assert!(grid.rows[0].timesheet_ids.is_empty());
    }
}

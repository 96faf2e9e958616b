// Full register lifecycle against the in-memory backend.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use timesheet_register::adapters::in_memory::backend::InMemoryBackend;
use timesheet_register::application::register::TimesheetRegister;
use timesheet_register::core::model::{Role, Session, TimesheetStatus};
use timesheet_register::core::ports::TimesheetGateway;
use timesheet_register::core::week::WeekWindow;

type Register = TimesheetRegister<InMemoryBackend, InMemoryBackend, InMemoryBackend>;

fn session() -> Session {
    Session {
        user_id: "emp-flow-0001".into(),
        user_name: "Asha Rao".into(),
        role: Role::Employee,
        access_token: "token".into(),
        refresh_token: "refresh".into(),
    }
}

fn register_for(backend: &Arc<InMemoryBackend>, monday: &str) -> Register {
    TimesheetRegister::new(
        session(),
        backend.clone(),
        backend.clone(),
        backend.clone(),
        WeekWindow::containing(monday.parse().unwrap()),
    )
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[rstest]
#[tokio::test]
async fn it_should_carry_a_week_from_first_edit_to_submission() {
    let backend = Arc::new(InMemoryBackend::new());
    let mut register = register_for(&backend, "2024-01-01");
    register.load_week().await.unwrap();

    // First pass: fill the workweek and save.
    register.set_task_name(0, "Platform work");
    for day in [
        "2024-01-01",
        "2024-01-02",
        "2024-01-03",
        "2024-01-04",
        "2024-01-05",
    ] {
        register.set_hours(0, date(day), 8.0);
    }
    register.save().await.unwrap();
    assert_eq!(backend.entry_count().await, 5);

    // Second pass: correct one day. Dirtiness is tracked per row, so
    // every persisted cell of the row goes out as an update.
    register.set_hours(0, date("2024-01-03"), 6.0);
    register.save().await.unwrap();
    let calls = backend.calls().await;
    assert_eq!(calls.creates, 1);
    assert_eq!(calls.updates, 5);
    let entries = backend
        .fetch_range(date("2024-01-01"), date("2024-01-07"))
        .await
        .unwrap();
    let wednesday: Vec<_> = entries
        .iter()
        .filter(|e| e.work_date == date("2024-01-03"))
        .collect();
    assert_eq!(wednesday.len(), 1);
    assert_eq!(wednesday[0].hours_worked, 6.0);

    register.submit_for_approval().await.unwrap();
    assert!(register.is_locked());

    // A fresh register over the same week sees the submitted state and
    // locks itself from the fetched statuses alone.
    let mut reloaded = register_for(&backend, "2024-01-01");
    reloaded.load_week().await.unwrap();
    assert!(reloaded.is_locked());
    assert!(
        reloaded.grid().rows[0]
            .hours
            .values()
            .all(|h| *h > 0.0)
    );
}

#[rstest]
#[tokio::test]
async fn it_should_keep_weeks_independent_when_navigating() {
    let backend = Arc::new(InMemoryBackend::new());
    backend
        .seed_entry(timesheet_register::core::model::TimesheetEntry {
            timesheet_id: Some("ts-jan".into()),
            work_date: date("2024-01-02"),
            hours_worked: 8.0,
            task_name: "January task".into(),
            task_description: String::new(),
            status: TimesheetStatus::Draft,
        })
        .await;
    backend
        .seed_entry(timesheet_register::core::model::TimesheetEntry {
            timesheet_id: Some("ts-feb".into()),
            work_date: date("2024-02-06"),
            hours_worked: 4.0,
            task_name: "February task".into(),
            task_description: String::new(),
            status: TimesheetStatus::Draft,
        })
        .await;

    let mut register = register_for(&backend, "2024-01-01");
    register.load_week().await.unwrap();
    assert_eq!(register.grid().rows[0].task_name, "January task");

    register.select_date(date("2024-02-08")).await.unwrap();
    assert_eq!(register.week().start(), date("2024-02-05"));
    assert_eq!(register.grid().rows[0].task_name, "February task");

    register.select_date(date("2024-01-04")).await.unwrap();
    assert_eq!(register.grid().rows[0].task_name, "January task");
}

#[rstest]
#[tokio::test]
async fn it_should_remove_a_row_and_its_backend_records() {
    let backend = Arc::new(InMemoryBackend::new());
    let mut register = register_for(&backend, "2024-01-01");
    register.load_week().await.unwrap();

    register.set_task_name(0, "Doomed task");
    register.set_hours(0, date("2024-01-01"), 8.0);
    register.set_hours(0, date("2024-01-02"), 8.0);
    register.save().await.unwrap();
    assert_eq!(backend.entry_count().await, 2);

    register.delete_row(0).await.unwrap();
    assert_eq!(backend.entry_count().await, 0);
    assert_eq!(backend.calls().await.deletes, 2);
}

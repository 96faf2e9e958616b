// Composition root: wire the REST adapters into the register, log in,
// load the current week and print it.

use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::{EnvFilter, fmt};

use timesheet_register::adapters::http::auth::AuthClient;
use timesheet_register::adapters::http::client::RestClient;
use timesheet_register::adapters::http::reference::{HolidayCalendarClient, LeaveSummaryClient};
use timesheet_register::adapters::http::timesheets::TimesheetClient;
use timesheet_register::application::register::TimesheetRegister;
use timesheet_register::core::week::WeekWindow;
use timesheet_register::shell::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let anonymous = RestClient::new(&config.base_url)?;
    let session = AuthClient::new(anonymous.clone())
        .login(&config.input_key, &config.password)
        .await?;
    tracing::info!(user = %session.user_name, role = ?session.role, "logged in");

    let rest = anonymous.with_bearer(session.access_token.clone());
    let timesheets = Arc::new(TimesheetClient::new(rest.clone(), &session));
    let holidays = Arc::new(HolidayCalendarClient::new(rest.clone()));
    let leaves = Arc::new(LeaveSummaryClient::new(rest, &session));

    let week = WeekWindow::containing(Local::now().date_naive());
    let mut register = TimesheetRegister::new(session, timesheets, holidays, leaves, week);
    register.load_week().await?;

    println!(
        "Week of {} to {}{}",
        register.week().start(),
        register.week().end(),
        if register.is_locked() { " (submitted)" } else { "" }
    );
    for row in &register.grid().rows {
        let name = if row.task_name.is_empty() {
            "(unnamed)"
        } else {
            &row.task_name
        };
        let hours: Vec<String> = register
            .week()
            .dates()
            .iter()
            .map(|date| format!("{:>5.1}", row.hours_on(*date)))
            .collect();
        println!("{name:<24} {}", hours.join(" "));
    }
    let totals: Vec<String> = register
        .grid()
        .day_totals()
        .iter()
        .map(|total| format!("{total:>5.1}"))
        .collect();
    println!("{:<24} {}", "total", totals.join(" "));

    for notice in register.take_notices() {
        println!("[{:?}] {}", notice.level, notice.text);
    }
    Ok(())
}

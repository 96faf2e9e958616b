// Smoke test against a real backend. Ignored by default; run with the
// test-integration script and a populated .env file.

use std::sync::Arc;

use chrono::Local;

use timesheet_register::adapters::http::auth::AuthClient;
use timesheet_register::adapters::http::client::RestClient;
use timesheet_register::adapters::http::reference::{HolidayCalendarClient, LeaveSummaryClient};
use timesheet_register::adapters::http::timesheets::TimesheetClient;
use timesheet_register::application::register::TimesheetRegister;
use timesheet_register::core::week::WeekWindow;

#[tokio::test]
#[ignore = "integration: needs a running backend and credentials"]
async fn it_should_log_in_and_load_the_current_week_integration() {
    dotenvy::dotenv().ok();
    let base_url = std::env::var("TIMESHEET_BASE_URL").expect("TIMESHEET_BASE_URL");
    let input_key = std::env::var("TIMESHEET_INPUT_KEY").expect("TIMESHEET_INPUT_KEY");
    let password = std::env::var("TIMESHEET_PASSWORD").expect("TIMESHEET_PASSWORD");

    let anonymous = RestClient::new(&base_url).unwrap();
    let session = AuthClient::new(anonymous.clone())
        .login(&input_key, &password)
        .await
        .expect("login");
    assert!(!session.user_id.is_empty());
    assert!(!session.access_token.is_empty());

    let rest = anonymous.with_bearer(session.access_token.clone());
    let timesheets = Arc::new(TimesheetClient::new(rest.clone(), &session));
    let holidays = Arc::new(HolidayCalendarClient::new(rest.clone()));
    let leaves = Arc::new(LeaveSummaryClient::new(rest, &session));

    let week = WeekWindow::containing(Local::now().date_naive());
    let mut register = TimesheetRegister::new(session, timesheets, holidays, leaves, week);
    register.load_week().await.expect("load current week");
    assert!(!register.grid().rows.is_empty());
}

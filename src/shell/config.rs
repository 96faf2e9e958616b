// Runtime configuration for the binary, read from the environment.

use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub input_key: String,
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: env::var("TIMESHEET_BASE_URL")
                .context("TIMESHEET_BASE_URL is not set")?,
            input_key: env::var("TIMESHEET_INPUT_KEY")
                .context("TIMESHEET_INPUT_KEY is not set")?,
            password: env::var("TIMESHEET_PASSWORD")
                .context("TIMESHEET_PASSWORD is not set")?,
        })
    }
}

// Salary generation trigger. The backend wants the period as a single
// "YYYY-MM" string.

use serde_json::Value;

use crate::adapters::http::client::RestClient;
use crate::core::ports::GatewayError;

pub struct SalaryApi {
    rest: RestClient,
}

impl SalaryApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn generate(&self, year: i32, month: u32) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "month": format!("{year}-{month:02}") });
        let _: Option<Value> = self.rest.post("/salary/generate", &[], &body).await?;
        Ok(())
    }
}

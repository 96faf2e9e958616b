// Employee directory endpoints used by the admin surfaces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::id_field;
use crate::core::ports::GatewayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default, deserialize_with = "id_field")]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub personal_email: Option<String>,
    #[serde(default)]
    pub company_email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(default)]
    pub available_leaves: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpsertDto {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,
}

pub struct EmployeesApi {
    rest: RestClient,
}

impl EmployeesApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn list(&self) -> Result<Vec<EmployeeDto>, GatewayError> {
        let records: Option<Vec<EmployeeDto>> =
            self.rest.get("/admin/view/employees", &[]).await?;
        Ok(records.unwrap_or_default())
    }

    pub async fn get(&self, employee_id: &str) -> Result<Option<EmployeeDto>, GatewayError> {
        self.rest
            .get(&format!("/admin/view/employee/{employee_id}"), &[])
            .await
    }

    pub async fn register(&self, employee: &EmployeeUpsertDto) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .post("/admin/employee/register", &[], employee)
            .await?;
        Ok(())
    }

    pub async fn update(
        &self,
        employee_id: &str,
        employee: &EmployeeUpsertDto,
    ) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .put(&format!("/admin/employee/update/{employee_id}"), &[], employee)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod employee_dto_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_parse_a_sparse_employee_record() {
        let dto: EmployeeDto = serde_json::from_str(
            r#"{"employeeId":17,"firstName":"Asha","lastName":"Rao","dateOfJoining":"2022-07-01"}"#,
        )
        .unwrap();
        assert_eq!(dto.employee_id.as_deref(), Some("17"));
        assert_eq!(dto.first_name, "Asha");
        assert_eq!(
            dto.date_of_joining,
            Some("2022-07-01".parse().unwrap())
        );
        assert!(dto.company_email.is_none());
    }

    #[rstest]
    fn it_should_omit_unset_fields_from_the_upsert_body() {
        let body = EmployeeUpsertDto {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            personal_email: None,
            company_email: None,
            contact_number: None,
            designation: Some("Engineer".into()),
            date_of_joining: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["designation"], "Engineer");
        assert!(json.get("personalEmail").is_none());
    }
}

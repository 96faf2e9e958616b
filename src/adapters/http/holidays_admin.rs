// Holiday scheme and holiday calendar administration endpoints.
//
// Route oddities preserved from the backend: scheme and calendar
// updates take the id as a PATH parameter while both deletes take it
// as a QUERY parameter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::{HolidayCalendarDto, HolidayCalendarUpsertDto, id_field};
use crate::core::model::HolidayCalendarEntry;
use crate::core::ports::GatewayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaySchemeDto {
    #[serde(default, deserialize_with = "id_field")]
    pub holiday_scheme_id: Option<String>,
    #[serde(default)]
    pub scheme_name: String,
    #[serde(default)]
    pub scheme_description: String,
    #[serde(default)]
    pub scheme_country_code: Option<String>,
    #[serde(default, deserialize_with = "id_field")]
    pub created_by_admin_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaySchemeUpsertDto {
    pub scheme_name: String,
    pub scheme_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_country_code: Option<String>,
}

/// Paging and filtering knobs of the scheme listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct SchemeQuery {
    pub scheme_country_code: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SchemeQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(code) = &self.scheme_country_code {
            pairs.push(("schemeCountryCode", code.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        pairs
    }
}

pub struct HolidayAdminApi {
    rest: RestClient,
}

impl HolidayAdminApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn create_scheme(&self, scheme: &HolidaySchemeUpsertDto) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .post("/holidays/scheme/register", &[], scheme)
            .await?;
        Ok(())
    }

    pub async fn update_scheme(
        &self,
        scheme_id: &str,
        scheme: &HolidaySchemeUpsertDto,
    ) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .put(&format!("/holidays/scheme/update/{scheme_id}"), &[], scheme)
            .await?;
        Ok(())
    }

    pub async fn delete_scheme(&self, scheme_id: &str) -> Result<(), GatewayError> {
        let query = [("id", scheme_id.to_string())];
        let _: Option<Value> = self.rest.delete("/holidays/scheme/delete", &query).await?;
        Ok(())
    }

    pub async fn list_schemes(
        &self,
        query: &SchemeQuery,
    ) -> Result<Vec<HolidaySchemeDto>, GatewayError> {
        let records: Option<Vec<HolidaySchemeDto>> = self
            .rest
            .get("/holidays/view/scheme", &query.to_pairs())
            .await?;
        Ok(records.unwrap_or_default())
    }

    pub async fn get_scheme(&self, scheme_id: &str) -> Result<Option<HolidaySchemeDto>, GatewayError> {
        self.rest
            .get(&format!("/holidays/view/scheme/{scheme_id}"), &[])
            .await
    }

    pub async fn create_holiday(
        &self,
        holiday: &HolidayCalendarUpsertDto,
    ) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .post("/holidays/calendar/register", &[], holiday)
            .await?;
        Ok(())
    }

    pub async fn update_holiday(
        &self,
        holiday_id: &str,
        holiday: &HolidayCalendarUpsertDto,
    ) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .put(&format!("/holidays/calendar/update/{holiday_id}"), &[], holiday)
            .await?;
        Ok(())
    }

    pub async fn delete_holiday(&self, holiday_id: &str) -> Result<(), GatewayError> {
        let query = [("id", holiday_id.to_string())];
        let _: Option<Value> = self
            .rest
            .delete("/holidays/calendar/delete", &query)
            .await?;
        Ok(())
    }

    pub async fn get_holiday(
        &self,
        holiday_id: &str,
    ) -> Result<Option<HolidayCalendarEntry>, GatewayError> {
        let record: Option<HolidayCalendarDto> = self
            .rest
            .get(&format!("/holidays/view/calendar/{holiday_id}"), &[])
            .await?;
        Ok(record.map(HolidayCalendarDto::into_entry))
    }
}

#[cfg(test)]
mod scheme_query_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_only_emit_set_parameters() {
        let query = SchemeQuery {
            scheme_country_code: Some("IN".into()),
            page: Some(0),
            size: None,
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("schemeCountryCode", "IN".to_string()),
                ("page", "0".to_string()),
            ]
        );
        assert!(SchemeQuery::default().to_pairs().is_empty());
    }
}

// Client (customer) directory endpoints used by the admin surfaces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::id_field;
use crate::core::ports::GatewayError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(default, deserialize_with = "id_field")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gst: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub pan_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpsertDto {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
}

pub struct ClientsApi {
    rest: RestClient,
}

impl ClientsApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn list(&self) -> Result<Vec<ClientDto>, GatewayError> {
        let records: Option<Vec<ClientDto>> = self.rest.get("/admin/view/clients", &[]).await?;
        Ok(records.unwrap_or_default())
    }

    pub async fn get(&self, client_id: &str) -> Result<Option<ClientDto>, GatewayError> {
        self.rest
            .get(&format!("/admin/view/client/{client_id}"), &[])
            .await
    }

    pub async fn register(&self, client: &ClientUpsertDto) -> Result<(), GatewayError> {
        let _: Option<Value> = self.rest.post("/admin/client/register", &[], client).await?;
        Ok(())
    }

    pub async fn update(
        &self,
        client_id: &str,
        client: &ClientUpsertDto,
    ) -> Result<(), GatewayError> {
        let _: Option<Value> = self
            .rest
            .put(&format!("/admin/client/update/{client_id}"), &[], client)
            .await?;
        Ok(())
    }
}

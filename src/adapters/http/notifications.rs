// User notification endpoints. These live under a different route
// prefix than the rest of the backend and mark-as-read is a PATCH
// with the id in the query string.

use serde::Deserialize;
use serde_json::Value;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::id_field;
use crate::core::ports::GatewayError;

const PREFIX: &str = "/web/api/v1/notification";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    #[serde(default, deserialize_with = "id_field")]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, alias = "isRead")]
    pub read: bool,
}

pub struct NotificationsApi {
    rest: RestClient,
}

impl NotificationsApi {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn list(&self) -> Result<Vec<NotificationDto>, GatewayError> {
        let records: Option<Vec<NotificationDto>> = self
            .rest
            .get(&format!("{PREFIX}/getAllNotifications"), &[])
            .await?;
        Ok(records.unwrap_or_default())
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<(), GatewayError> {
        let query = [("notificationId", notification_id.to_string())];
        let _: Option<Value> = self
            .rest
            .patch_query(&format!("{PREFIX}/read"), &query)
            .await?;
        Ok(())
    }

    pub async fn clear(&self, notification_id: &str) -> Result<(), GatewayError> {
        let query = [("notificationId", notification_id.to_string())];
        let _: Option<Value> = self.rest.delete(&format!("{PREFIX}/clear"), &query).await?;
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<(), GatewayError> {
        let _: Option<Value> = self.rest.delete(&format!("{PREFIX}/clearAll"), &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod notification_dto_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_accept_either_read_flag_spelling() {
        let plain: NotificationDto = serde_json::from_str(
            r#"{"notificationId":3,"message":"Timesheet approved","read":true}"#,
        )
        .unwrap();
        let aliased: NotificationDto = serde_json::from_str(
            r#"{"notificationId":"n-4","message":"Salary generated","isRead":true}"#,
        )
        .unwrap();
        assert_eq!(plain.notification_id.as_deref(), Some("3"));
        assert!(plain.read);
        assert_eq!(aliased.notification_id.as_deref(), Some("n-4"));
        assert!(aliased.read);
    }
}

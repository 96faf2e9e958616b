// Shared REST plumbing for every backend-facing client.
//
// Responsibilities
// - Hold the reqwest client, the base URL and the optional bearer token.
// - Decode the backend's `{flag, message, status, response, totalRecords,
//   otherInfo}` envelope and turn `flag == false` into a rejection even
//   when the HTTP status reads 200.
//
// Boundaries
// - No endpoint knowledge here. Paths, query shapes and DTOs live in the
//   per-resource clients next to this module.
//
// Testing guidance
// - Envelope decoding is pure and covered below. Endpoint wiring is
//   exercised through the in-memory adapter in application tests.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::ports::GatewayError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Standard response wrapper every backend endpoint replies with.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebResponse<T> {
    #[serde(default)]
    pub flag: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default = "Option::default")]
    pub response: Option<T>,
    #[serde(default)]
    pub total_records: i64,
    #[serde(default)]
    pub other_info: Option<serde_json::Value>,
}

impl<T> WebResponse<T> {
    /// The backend signals failure through `flag`, not the HTTP status.
    pub fn into_result(self) -> Result<Option<T>, GatewayError> {
        if self.flag {
            Ok(self.response)
        } else {
            Err(GatewayError::Rejected {
                status: self.status,
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            bearer: None,
        })
    }

    /// Attach the session's access token to every subsequent request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, GatewayError> {
        self.execute(self.http.get(self.url(path)).query(query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Option<T>, GatewayError> {
        self.execute(self.http.post(self.url(path)).query(query).json(body))
            .await
    }

    /// POST with query parameters and an empty body. The login endpoint
    /// takes its credentials this way.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, GatewayError> {
        self.execute(self.http.post(self.url(path)).query(query))
            .await
    }

    /// PATCH with query parameters and an empty body, as the
    /// notification read endpoint expects.
    pub async fn patch_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, GatewayError> {
        self.execute(self.http.patch(self.url(path)).query(query))
            .await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Option<T>, GatewayError> {
        self.execute(self.http.put(self.url(path)).query(query).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, GatewayError> {
        self.execute(self.http.delete(self.url(path)).query(query))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, GatewayError> {
        let request = match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let http_status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let envelope: WebResponse<T> = serde_json::from_str(&body).map_err(|err| {
            // Gateways in front of the backend answer plain-text errors
            // without the envelope. Keep those distinguishable.
            if http_status.is_success() {
                GatewayError::Transport(format!("malformed response body: {err}"))
            } else {
                GatewayError::Rejected {
                    status: i64::from(http_status.as_u16()),
                    message: format!("HTTP {http_status}"),
                }
            }
        })?;
        envelope.into_result()
    }
}

#[cfg(test)]
mod web_response_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_unwrap_the_payload_when_the_flag_is_set() {
        let envelope: WebResponse<Vec<i64>> = serde_json::from_str(
            r#"{"flag":true,"message":"ok","status":200,"response":[1,2],"totalRecords":2}"#,
        )
        .unwrap();
        assert_eq!(envelope.total_records, 2);
        assert_eq!(envelope.into_result().unwrap(), Some(vec![1, 2]));
    }

    #[rstest]
    fn it_should_reject_when_the_flag_is_false_despite_a_payload() {
        let envelope: WebResponse<Vec<i64>> = serde_json::from_str(
            r#"{"flag":false,"message":"duplicate entry","status":409,"response":[1]}"#,
        )
        .unwrap();
        assert_eq!(
            envelope.into_result(),
            Err(GatewayError::Rejected {
                status: 409,
                message: "duplicate entry".into(),
            })
        );
    }

    #[rstest]
    fn it_should_tolerate_a_missing_response_field() {
        let envelope: WebResponse<Vec<i64>> =
            serde_json::from_str(r#"{"flag":true,"message":"deleted","status":200}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap(), None);
    }

    #[rstest]
    fn it_should_join_base_and_path_without_doubling_slashes() {
        let client = RestClient::new("http://localhost:8080/").unwrap();
        assert_eq!(
            client.url("/employee/view/timesheet"),
            "http://localhost:8080/employee/view/timesheet"
        );
    }
}

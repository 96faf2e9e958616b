// Login and token refresh against the backend's auth endpoints.
//
// Backend quirks faithfully handled
// - `/auth/login` takes its credentials as QUERY parameters on a POST.
// - The login payload nests twice: the envelope's `response` holds a
//   `data` object, whose tokens and role sit under `loginResponseDTO`.
// - Admins carry `userId`/`userName`; employees carry `employeeId` and
//   a first/last name pair.

use serde::Deserialize;

use crate::adapters::http::client::RestClient;
use crate::adapters::http::dto::id_field;
use crate::core::model::{Role, Session};
use crate::core::ports::GatewayError;

pub struct AuthClient {
    rest: RestClient,
}

#[derive(Debug, Deserialize)]
struct DataWrapper<T> {
    #[serde(default = "Option::default")]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginInnerDto {
    #[serde(default, deserialize_with = "id_field")]
    user_id: Option<String>,
    #[serde(default, deserialize_with = "id_field")]
    employee_id: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default, rename = "loginResponseDTO")]
    login_response: Option<LoginTokensDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginTokensDto {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshInnerDto {
    user: RefreshUserDto,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshUserDto {
    #[serde(default, deserialize_with = "id_field")]
    user_id: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

fn parse_role(raw: Option<&str>) -> Role {
    match raw.map(str::to_ascii_uppercase).as_deref() {
        Some("ADMIN") => Role::Admin,
        Some("CLIENT") => Role::Client,
        _ => Role::Employee,
    }
}

fn session_from_login(inner: LoginInnerDto) -> Result<Session, GatewayError> {
    let tokens = inner
        .login_response
        .ok_or_else(|| GatewayError::Transport("login response missing loginResponseDTO".into()))?;
    let role = parse_role(tokens.role.as_deref());
    // Admins are identified by userId; everyone else by employeeId.
    let is_admin = inner.user_id.is_some() && role == Role::Admin;
    let user_id = if is_admin {
        inner.user_id
    } else {
        inner.employee_id
    }
    .ok_or_else(|| GatewayError::Transport("login response missing user id".into()))?;
    let user_name = if is_admin {
        inner.user_name.unwrap_or_default()
    } else {
        let first = inner.first_name.unwrap_or_default();
        let last = inner.last_name.unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    };
    Ok(Session {
        user_id,
        user_name,
        role,
        access_token: tokens.access_token.unwrap_or_default(),
        refresh_token: tokens.refresh_token.unwrap_or_default(),
    })
}

impl AuthClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn login(
        &self,
        input_key: &str,
        password: &str,
    ) -> Result<Session, GatewayError> {
        let query = [
            ("inputKey", input_key.to_string()),
            ("password", password.to_string()),
        ];
        let payload: Option<DataWrapper<LoginInnerDto>> =
            self.rest.post_query("/auth/login", &query).await?;
        let inner = payload
            .and_then(|wrapper| wrapper.data)
            .ok_or_else(|| GatewayError::Transport("login response missing payload".into()))?;
        session_from_login(inner)
    }

    /// Exchange a refresh token for a fresh session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, GatewayError> {
        let body = serde_json::json!({ "refreshToken": refresh_token });
        let payload: Option<DataWrapper<RefreshInnerDto>> =
            self.rest.post("/auth/refreshToken", &[], &body).await?;
        let inner = payload
            .and_then(|wrapper| wrapper.data)
            .ok_or_else(|| GatewayError::Transport("refresh response missing payload".into()))?;
        let user_id = inner
            .user
            .user_id
            .ok_or_else(|| GatewayError::Transport("refresh response missing user id".into()))?;
        Ok(Session {
            user_id,
            user_name: inner.user.user_name.unwrap_or_default(),
            role: parse_role(inner.user.role.as_deref()),
            access_token: inner.access_token.unwrap_or_default(),
            refresh_token: inner.refresh_token.unwrap_or_default(),
        })
    }
}

//! Auth API client
//!
//! `POST <api_url>/api/auth/signup` and `/login`. Both answer with
//! `{success, data?, message?}`; `data` carries the token and user.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint, http_client, status_error, ApiError, ApiResult};
use crate::config::Config;

/// Account creation form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Build a signup form, checking the password confirmation
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: &str,
    ) -> ApiResult<Self> {
        let request = Self {
            full_name: full_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
        };

        if request.full_name.is_empty() || request.email.is_empty() {
            return Err(ApiError::InvalidInput(
                "Name and email are required".to_string(),
            ));
        }
        if request.password != confirm_password {
            return Err(ApiError::InvalidInput("Passwords do not match".to_string()));
        }
        Ok(request)
    }
}

/// Login form
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Account details returned on login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Token and user of an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthData {
    pub token: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// Envelope returned by the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<AuthData>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResult {
    /// Session data of a successful response, or the server's reason
    pub fn into_data(self, fallback: &str) -> ApiResult<AuthData> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Rejected(format!(
                "{}: response carried no session",
                fallback
            ))),
            (false, _) => Err(ApiError::Rejected(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }
}

/// Client for the auth endpoints
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(api_url: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: endpoint(api_url, "api/auth"),
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    /// Create an account; the backend logs the new user in
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<AuthData> {
        self.post("signup", request)
            .await?
            .into_data("Signup failed")
    }

    /// Log in with email and password
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthData> {
        self.post("login", request).await?.into_data("Login failed")
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<AuthResult> {
        let url = endpoint(&self.base_url, path);
        debug!(%url, "auth request");

        let response = self.http.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_json() -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "message": "Login successful",
            "data": {
                "token": "jwt-token",
                "type": "Bearer",
                "user": {"id": "42", "fullName": "Ada Lovelace", "email": "ada@example.com", "role": "USER"}
            }
        })
    }

    fn client(server: &MockServer) -> AuthClient {
        AuthClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_signup_rejects_mismatched_passwords() {
        let err = SignupRequest::new("Ada", "ada@example.com", "secret", "secrt").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_signup_requires_name_and_email() {
        assert!(SignupRequest::new("  ", "ada@example.com", "pw", "pw").is_err());
        assert!(SignupRequest::new("Ada", "", "pw", "pw").is_err());
    }

    #[test]
    fn test_signup_serializes_camel_case() {
        let request = SignupRequest::new("Ada", "ada@example.com", "pw", "pw").unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fullName"], "Ada");
        assert!(value.get("full_name").is_none());
    }

    #[test]
    fn test_rejected_result_uses_message() {
        let result: AuthResult =
            serde_json::from_str(r#"{"success":false,"message":"Invalid email or password"}"#)
                .unwrap();
        let err = result.into_data("Login failed").unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");

        let bare: AuthResult = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(
            bare.into_data("Login failed").unwrap_err().to_string(),
            "Login failed"
        );
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "ada@example.com",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
            .expect(1)
            .mount(&server)
            .await;

        let data = client(&server)
            .login(&LoginRequest::new("ada@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(data.token, "jwt-token");
        assert_eq!(data.token_type.as_deref(), Some("Bearer"));
        assert_eq!(data.user.full_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_signup_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signup"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "success": false,
                "message": "Email already registered"
            })))
            .mount(&server)
            .await;

        let request = SignupRequest::new("Ada", "ada@example.com", "pw", "pw").unwrap();
        let err = client(&server).signup(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert!(err.to_string().contains("Email already registered"));
    }
}

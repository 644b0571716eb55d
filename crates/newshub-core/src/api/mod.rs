//! Backend API clients
//!
//! Thin wrappers over the news and auth endpoints. Every call is a single
//! request: failures are returned to the caller to show, never retried.

pub mod auth;
pub mod news;

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub use auth::{AuthClient, AuthData, AuthResult, LoginRequest, SignupRequest, User};
pub use news::{Category, FeedRequest, NewsClient};

/// Errors returned by the API clients
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure (connection, timeout, undecodable body)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// Server answered but refused the request (`success: false`)
    #[error("{0}")]
    Rejected(String),

    /// Invalid input caught before sending
    #[error("{0}")]
    InvalidInput(String),
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body shape used by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Build the shared HTTP client
fn http_client(timeout: Duration) -> ApiResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("newshub/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Join a base URL and a path without doubling slashes
fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn a non-success response into `ApiError::Status`
///
/// Uses the server's `message` field when the body carries one.
async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

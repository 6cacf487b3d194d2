//! HTTP client shared by all gateway implementations.
//!
//! Wraps a reqwest client with the backend base URL, a per-request
//! timeout, bearer-token injection from the shared handle, and the mapping
//! from HTTP status codes to the client's error taxonomy.

use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::session::BearerToken;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Error envelope used by the backend for non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Shared HTTP transport for the support-desk API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: BearerToken,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - URL prefix all endpoint paths are joined to
    /// * `timeout` - Per-request transport timeout
    /// * `token` - Shared bearer handle owned by the session store
    pub fn new(base_url: impl Into<String>, timeout: Duration, token: BearerToken) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeskmateError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns the bearer handle this client attaches to requests.
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Builds an authorized GET request.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    /// Builds an authorized POST request.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    /// Sends a request and decodes a JSON response body.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        response
            .json()
            .await
            .map_err(|e| DeskmateError::validation(format!("Failed to parse response body: {e}")))
    }

    /// Sends a request, discarding any response body.
    pub async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }

    /// Sends a request and maps transport and status failures into the
    /// client error taxonomy.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| DeskmateError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }
}

/// Maps a non-success HTTP status to a `DeskmateError`.
///
/// 401 and 403 become authentication errors so callers fail closed; other
/// 4xx become validation errors; 5xx and everything else are transport
/// failures. The message is pulled from the backend's `detail`/`message`
/// envelope when present.
pub fn map_status_error(status: StatusCode, body: &str) -> DeskmateError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail.or(b.message))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            tracing::warn!(status = %status, "Request rejected; session must fail closed");
            DeskmateError::authentication(message)
        }
        s if s.is_client_error() => DeskmateError::validation(message),
        _ => DeskmateError::network(format!("Server error ({status}): {message}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_authentication() {
        let err = map_status_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Token has expired"}"#,
        );
        assert!(err.is_authentication());
        assert!(err.to_string().contains("Token has expired"));
    }

    #[test]
    fn test_forbidden_maps_to_authentication() {
        let err = map_status_error(StatusCode::FORBIDDEN, "");
        assert!(err.is_authentication());
    }

    #[test]
    fn test_client_error_maps_to_validation() {
        let err = map_status_error(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"bad field"}"#);
        assert!(matches!(err, DeskmateError::Validation(_)));
    }

    #[test]
    fn test_server_error_maps_to_network() {
        let err = map_status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.is_network());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ApiClient::new(
            "http://localhost:8000/api/v1/",
            Duration::from_secs(5),
            BearerToken::new(),
        )
        .unwrap();
        assert_eq!(client.url("/categories"), "http://localhost:8000/api/v1/categories");
    }
}

//! Authentication endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::{AuthGateway, Registration, SignInResponse};
use deskmate_core::session::User;

/// `AuthGateway` implementation over the REST API.
#[derive(Clone)]
pub struct HttpAuthGateway {
    api: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse> {
        // The token endpoint speaks the OAuth2 password form.
        let form = [
            ("username", email),
            ("password", password),
            ("grant_type", "password"),
        ];

        let response = self.api.send(self.api.post("/auth/token").form(&form)).await;
        let response = match response {
            Ok(response) => response,
            // A 401 here means bad credentials, not an expired session.
            Err(e) if e.is_authentication() => return Err(DeskmateError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let parsed: SignInResponse = response.json().await.map_err(|e| {
            DeskmateError::validation(format!("Invalid sign-in response: {e}"))
        })?;

        if parsed.access_token.is_empty() {
            return Err(DeskmateError::validation(
                "Sign-in response carried an empty access token",
            ));
        }

        tracing::info!(user_id = %parsed.user.id, "Signed in");
        Ok(parsed)
    }

    async fn verify(&self) -> Result<User> {
        self.api.send_json(self.api.get("/auth/verify")).await
    }

    async fn register(&self, registration: &Registration) -> Result<User> {
        self.api
            .send_json(self.api.post("/auth/register").json(registration))
            .await
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use cvdeval_core::models::session::Session;

use crate::error::AuthError;

const FALLBACK_REGISTER_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Serialize)]
struct AuthenticateRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthenticateResponse {
    #[serde(rename = "Data")]
    data: AuthenticatedUser,
}

#[derive(Deserialize)]
struct AuthenticatedUser {
    #[serde(rename = "JWToken")]
    jw_token: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "UserName")]
    user_name: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    // The backend insists on a confirmation field; the form collects the
    // password once, so it is mirrored here.
    #[serde(rename = "ConfirmPassword")]
    confirm_password: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

/// Client for the account endpoints of the records backend. Neither
/// call carries authentication; a successful login yields the bearer
/// token everything else uses.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Authenticate and return the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/api/Account/authenticate", self.base_url);
        info!(email, "authenticating");

        let response = self
            .http
            .post(&url)
            .json(&AuthenticateRequest { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::LoginFailed(status.as_u16()));
        }

        let body: AuthenticateResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        info!(user = %body.data.user_name, "login succeeded");

        Ok(Session {
            token: Some(body.data.jw_token),
            user_name: Some(body.data.user_name),
            user_email: Some(body.data.email),
        })
    }

    /// Register a new account. Success returns the server's confirmation
    /// message (opaque text, possibly a URL) for display; failure carries
    /// the server-supplied message or a generic fallback.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        let url = format!("{}/api/Account/register", self.base_url);
        info!(email, "registering account");

        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                email,
                user_name: name,
                password,
                confirm_password: password,
            })
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body: MessageResponse = response
            .json()
            .await
            .unwrap_or(MessageResponse { message: None });

        if !status.is_success() {
            return Err(AuthError::RegistrationFailed(
                body.message
                    .unwrap_or_else(|| FALLBACK_REGISTER_MESSAGE.to_string()),
            ));
        }

        info!(email, "registration succeeded");
        Ok(body.message.unwrap_or_default())
    }
}

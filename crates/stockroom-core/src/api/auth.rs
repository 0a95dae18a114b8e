//! Login, registration and current-user calls.
//!
//! Auth errors keep the backend's wording (e.g. "Invalid credentials.")
//! because that is what the login and register forms show.

use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use super::{ApiClient, ApiError};
use crate::models::{Credentials, LoginResponse, UserProfile};

/// Shown when a registration succeeds with an empty body
const DEFAULT_REGISTER_MESSAGE: &str = "Registration successful!";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

impl ApiClient {
    /// Log in and return the token with a profile built from the username.
    /// The session is not touched; callers decide when to `Session::init`.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        info!(username = %credentials.username, "Attempting login");
        let response: TokenResponse = self
            .send_json(Method::POST, "/auth/login", credentials, "Login failed")
            .await?;

        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("Login failed - no token received".to_string()))?;

        Ok(LoginResponse {
            token,
            user: UserProfile::from_username(credentials.username.trim()),
        })
    }

    /// Register a new account. Returns the backend's confirmation text.
    pub async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        info!(username = %credentials.username, "Attempting registration");
        let request = self
            .request(Method::POST, "/auth/register")
            .json(credentials);
        let response = self.dispatch(request, "Registration failed").await?;
        let body = response.text().await.map_err(|source| ApiError::Network {
            context: "Registration failed".to_string(),
            source,
        })?;

        let message = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(serde_json::Value::String(text)) => text,
            _ => body.trim().to_string(),
        };

        if message.is_empty() {
            Ok(DEFAULT_REGISTER_MESSAGE.to_string())
        } else {
            Ok(message)
        }
    }

    /// Fetch the profile of the user the token belongs to.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("/auth/me", "Failed to get user info").await
    }
}

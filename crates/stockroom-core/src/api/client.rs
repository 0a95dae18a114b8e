//! Authenticated request layer for the inventory backend.
//!
//! Every request passes through two stages:
//!
//! - outbound: the current session token, if any, becomes an
//!   `Authorization: Bearer` header
//! - inbound: a 401 from any endpoint ends the session (clear storage,
//!   navigate to login) before the error is handed back to the caller
//!
//! All other failures are passed through as `ApiError`s for the typed calls
//! to word for their operation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::ApiError;
use crate::auth::Session;
use crate::config::Config;

/// API client for the inventory backend.
/// Clone is cheap - reqwest::Client and the session are both shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a client for `base_url` bound to `session`.
    pub fn new(base_url: impl Into<String>, session: Arc<Session>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Create a client using the configured base URL and timeout.
    pub fn from_config(config: &Config, session: Arc<Session>) -> Result<Self> {
        Self::new(config.api_base_url(), session, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Outbound stage: headers carrying the stored token, if there is one.
    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        match self.session.token() {
            Some(token) => {
                let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| {
                        ApiError::InvalidRequest("stored token is not a valid header value".to_string())
                    })?;
                headers.insert(header::AUTHORIZATION, value);
                debug!("Token attached to request");
            }
            None => {
                debug!("No token, sending request unauthenticated");
            }
        }
        Ok(headers)
    }

    /// Inbound stage: pass successes through, turn everything else into an
    /// `ApiError`. A 401 logs out first, whatever the endpoint.
    async fn check_response(&self, response: Response, fallback: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "401 Unauthorized, ending session");
            self.session.logout();
        } else {
            debug!(url = %url, status = status.as_u16(), "Request failed");
        }

        Err(ApiError::from_status(status, &body, fallback))
    }

    /// Send a request through both stages.
    /// `context` names the operation in errors, e.g. "Failed to fetch products".
    pub(crate) async fn dispatch(&self, request: RequestBuilder, context: &str) -> Result<Response, ApiError> {
        let response = request
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(|source| {
                warn!(error = %source, "{}", context);
                ApiError::Network {
                    context: context.to_string(),
                    source,
                }
            })?;

        self.check_response(response, context).await
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json")
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T, ApiError> {
        let response = self.dispatch(self.request(Method::GET, path), context).await?;
        Self::parse_json(response, context).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, ApiError> {
        let request = self.request(method, path).json(body);
        let response = self.dispatch(request, context).await?;
        Self::parse_json(response, context).await
    }

    pub(crate) async fn delete(&self, path: &str, context: &str) -> Result<(), ApiError> {
        self.dispatch(self.request(Method::DELETE, path), context).await?;
        Ok(())
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApiError> {
        let text = response.text().await.map_err(|source| ApiError::Network {
            context: context.to_string(),
            source,
        })?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialStore;
    use crate::navigation::RecordingNavigator;

    fn client() -> ApiClient {
        let session = Arc::new(Session::new(
            CredentialStore::in_memory(),
            Arc::new(RecordingNavigator::new()),
        ));
        ApiClient::new("http://localhost:8080/", session, Duration::from_secs(5))
            .expect("client builds")
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = client();
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.url("/api/products"), "http://localhost:8080/api/products");
    }

    #[test]
    fn test_no_token_no_authorization_header() {
        let api = client();
        let headers = api.auth_headers().unwrap();
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_becomes_bearer_header() {
        let api = client();
        api.session().init("abc123", None);
        let headers = api.auth_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc123")
        );
    }

    #[test]
    fn test_illegal_token_is_a_request_error() {
        let api = client();
        api.session().init("abc\n123", None);
        assert!(matches!(api.auth_headers(), Err(ApiError::InvalidRequest(_))));
    }
}

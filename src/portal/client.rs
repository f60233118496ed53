use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::session::PortalSession;
use crate::types::dto::auth::{LoginRequest, TokenResponse};

/// Failed API call as shown to a portal user
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct PortalError {
    /// HTTP status, or `None` when the API could not be reached
    pub status: Option<u16>,
    pub message: String,
    /// The session was dropped because the API rejected the token
    pub session_cleared: bool,
}

impl PortalError {
    fn transport(err: reqwest::Error) -> Self {
        tracing::warn!("API request failed: {}", err);
        Self {
            status: None,
            message: format!("API unavailable: {}", err),
            session_cleared: false,
        }
    }
}

/// Build the error for a non-2xx response
///
/// Uses the API's `message` field when the body carries one. A 401 means the
/// stored token is no longer accepted, so the session is cleared.
pub fn interpret_failure(status: u16, body: &str, session: &mut PortalSession) -> PortalError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("Error {}", status));

    let session_cleared = status == StatusCode::UNAUTHORIZED.as_u16();
    if session_cleared {
        session.clear();
    }

    PortalError {
        status: Some(status),
        message,
        session_cleared,
    }
}

/// HTTP client for the service center API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Log in and store the token in the session
    pub async fn login(
        &self,
        session: &mut PortalSession,
        login: &str,
        password: &str,
    ) -> Result<TokenResponse, PortalError> {
        let body = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self
            .send(session, Method::POST, "/auth/login", Some(&body))
            .await?;
        session.sign_in(&token);
        Ok(token)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        session: &mut PortalSession,
        path: &str,
    ) -> Result<T, PortalError> {
        self.send::<(), T>(session, Method::GET, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        session: &mut PortalSession,
        path: &str,
        body: &B,
    ) -> Result<T, PortalError> {
        self.send(session, Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        session: &mut PortalSession,
        path: &str,
        body: &B,
    ) -> Result<T, PortalError> {
        self.send(session, Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        session: &mut PortalSession,
        path: &str,
    ) -> Result<T, PortalError> {
        self.send::<(), T>(session, Method::DELETE, path, None).await
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        session: &mut PortalSession,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, PortalError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(token) = &session.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(PortalError::transport)?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(PortalError::transport);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), url = %url, "API call rejected");
        Err(interpret_failure(status.as_u16(), &text, session))
    }
}

/**
 * API Client
 *
 * HTTP client functions for the pitwall server: auth/user endpoints,
 * raw JSON reads for the F1 data endpoints, and the AI news endpoint.
 *
 * Server-provided error messages are extracted from `{message}` (or
 * legacy `{error}`) bodies so callers can surface them verbatim, with a
 * generic fallback when the body is unreadable.
 */

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::client::config::ClientConfig;
use crate::shared::types::{
    AuthResponse, GeneratePromptRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};

/// Client-side failure, normalized for display
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// Transport-level failure; no HTTP response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The response parsed but its content is unusable
    #[error("{0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether this failure is a 401-class credential rejection
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status: 401,
                ..
            }
        )
    }
}

/// Extract a display message from an error response body.
///
/// Prefers `message`, then `error`, then the raw body, then the status.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if !body.is_empty() {
        return body.to_string();
    }
    format!("Request failed: {status}")
}

/// HTTP client for the pitwall API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_error_message(status, &body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Register a new user; no token is issued
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ClientError> {
        let url = self.config.api_url("/api/auth/register");
        self.send(self.client.post(&url).json(request)).await
    }

    /// Log in and receive a session token plus the user
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let url = self.config.api_url("/api/auth/login");
        self.send(self.client.post(&url).json(request)).await
    }

    /// Fetch the current user for a token
    pub async fn me(&self, token: &str) -> Result<UserResponse, ClientError> {
        let url = self.config.api_url("/api/user/me");
        self.send(self.client.get(&url).bearer_auth(token)).await
    }

    /// Apply a partial profile update for a token
    pub async fn update_me(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<UserResponse, ClientError> {
        let url = self.config.api_url("/api/user/me");
        self.send(self.client.patch(&url).bearer_auth(token).json(request))
            .await
    }

    /// Read an F1 data endpoint as raw JSON
    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = self.config.api_url(path);
        self.send(self.client.get(&url)).await
    }

    /// Ask the server to generate news text for a prompt
    pub async fn generate_news(&self, prompt: &str) -> Result<Value, ClientError> {
        let url = self.config.api_url("/api/ai/generate-news");
        let request = GeneratePromptRequest {
            prompt: prompt.to_string(),
        };
        self.send(self.client.post(&url).json(&request)).await
    }
}

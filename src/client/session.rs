/**
 * Client Session Manager
 *
 * Owns the authenticated session: a serializable state struct crossed
 * with an optional identity, mutated only through the operations below.
 *
 * # State Machine
 *
 * Every operation moves status through idle -> loading -> succeeded or
 * failed. The identity slot is last-writer-wins; operations are
 * user-initiated and serialized by the caller, never concurrent.
 *
 * # Session Invalidation
 *
 * A 401 from any authenticated call is terminal: the persisted token
 * and the identity are cleared rather than surfacing a retryable error.
 * Logout clears unconditionally and needs no server call, since tokens
 * are stateless.
 */

use serde::Serialize;

use crate::client::api::{ApiClient, ClientError};
use crate::client::config::ClientConfig;
use crate::client::storage::TokenStorage;
use crate::shared::types::{LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse};

/// Operation status of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Serializable session state
///
/// Fields are private; transitions happen only through
/// [`SessionManager`] operations.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    status: SessionStatus,
    token: Option<String>,
    user: Option<UserResponse>,
    error: Option<String>,
}

impl SessionState {
    fn new(token: Option<String>) -> Self {
        Self {
            status: SessionStatus::Idle,
            token,
            user: None,
            error: None,
        }
    }

    fn begin(&mut self) {
        self.status = SessionStatus::Loading;
        self.error = None;
    }

    fn succeed(&mut self) {
        self.status = SessionStatus::Succeeded;
    }

    fn fail(&mut self, message: String) {
        self.status = SessionStatus::Failed;
        self.error = Some(message);
    }
}

/// Session manager owning state, storage, and the HTTP client
pub struct SessionManager {
    api: ApiClient,
    storage: TokenStorage,
    state: SessionState,
}

impl SessionManager {
    /// Create a manager, rehydrating any persisted token
    pub fn new(config: ClientConfig) -> Self {
        let storage = match config.storage_path_override() {
            Some(path) => TokenStorage::at(path.clone()),
            None => TokenStorage::new(),
        };
        let token = storage.load();

        Self {
            api: ApiClient::new(config),
            storage,
            state: SessionState::new(token),
        }
    }

    /// Register a new account
    ///
    /// Success does not authenticate; a separate [`login`](Self::login)
    /// is required.
    pub async fn register(&mut self, username: &str, email: &str, password: &str) {
        self.state.begin();

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            favorite_driver_ids: None,
            favorite_team_ids: None,
        };

        match self.api.register(&request).await {
            Ok(user) => {
                tracing::info!("Registered user: {}", user.username);
                self.state.succeed();
            }
            Err(e) => self.state.fail(display_error(e, "Register failed")),
        }
    }

    /// Log in and persist the session token
    pub async fn login(&mut self, username_or_email: &str, password: &str) {
        self.state.begin();

        let request = LoginRequest {
            username_or_email: username_or_email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&request).await {
            Ok(response) => {
                if response.token.is_empty() {
                    self.state
                        .fail("Invalid server response: missing token or user".to_string());
                    return;
                }
                tracing::info!("Logged in as: {}", response.user.username);
                self.storage.save(&response.token);
                self.state.token = Some(response.token);
                self.state.user = Some(response.user);
                self.state.succeed();
            }
            Err(e) => self.state.fail(display_error(e, "Login failed")),
        }
    }

    /// Rehydrate identity from the persisted token
    ///
    /// Run once at application start, before dependent reads. A
    /// 401-class failure clears the session; it is terminal, not
    /// retryable.
    pub async fn fetch_current_user(&mut self) {
        self.state.begin();

        let token = match self.state.token.clone().or_else(|| self.storage.load()) {
            Some(token) => token,
            None => {
                self.clear_session();
                self.state.fail("No token".to_string());
                return;
            }
        };

        match self.api.me(&token).await {
            Ok(user) => {
                self.state.token = Some(token);
                self.state.user = Some(user);
                self.state.succeed();
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::info!("Persisted token rejected, clearing session");
                    self.clear_session();
                }
                self.state.fail(display_error(e, "Fetch user failed"));
            }
        }
    }

    /// Apply a partial profile update
    pub async fn update_profile(&mut self, request: UpdateProfileRequest) {
        self.state.begin();

        let token = match self.state.token.clone() {
            Some(token) => token,
            None => {
                self.state.fail("Unauthorized".to_string());
                return;
            }
        };

        match self.api.update_me(&token, &request).await {
            Ok(user) => {
                self.state.user = Some(user);
                self.state.succeed();
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::info!("Token rejected during update, clearing session");
                    self.clear_session();
                }
                self.state.fail(display_error(e, "Update user failed"));
            }
        }
    }

    /// Drop the session locally
    ///
    /// Tokens are stateless, so no server call is made.
    pub fn logout(&mut self) {
        self.clear_session();
        self.state.status = SessionStatus::Idle;
        self.state.error = None;
    }

    fn clear_session(&mut self) {
        self.storage.clear();
        self.state.token = None;
        self.state.user = None;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn user(&self) -> Option<&UserResponse> {
        self.state.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user.is_some()
    }
}

/// Prefer the server-provided message, fall back to a generic one
fn display_error(error: ClientError, fallback: &str) -> String {
    match error {
        ClientError::Api { message, .. } if !message.is_empty() => message,
        ClientError::Network(detail) => format!("Network error: {detail}"),
        _ => fallback.to_string(),
    }
}

/**
 * Login Handler
 *
 * This module implements the token issuer for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username, or by email if the input contains '@'
 * 2. Verify password using bcrypt
 * 3. Generate JWT token embedding userId and username
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown user and wrong password produce the same 401 so callers
 *   cannot enumerate accounts
 * - Password verification uses constant-time comparison (via bcrypt)
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::sessions::create_token;
use crate::backend::auth::store::UserStore;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::types::{AuthResponse, LoginRequest};

/// Login handler
///
/// Verifies the submitted credentials against the store and returns a
/// signed session token on success.
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store or token generation fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.username_or_email);

    // Input with an '@' is treated as an email, everything else as a username
    let user = if request.username_or_email.contains('@') {
        state.store.get_user_by_email(&request.username_or_email).await?
    } else {
        state.store.get_user_by_username(&request.username_or_email).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("User not found: {}", request.username_or_email);
        ApiError::Unauthorized
    })?;

    let valid = verify(&request.password, &user.password_hash)?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(ApiError::Unauthorized);
    }

    let token = create_token(&state.config.jwt_secret, user.id, &user.username)
        .map_err(|e| ApiError::Internal(format!("failed to create token: {e}")))?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::store::{NewUser, UserStore};

    async fn state_with_user(username: &str, email: &str, password: &str) -> AppState {
        let state = AppState::for_tests();
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).unwrap();
        state
            .store
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                favorite_driver_ids: vec![],
                favorite_team_ids: vec![],
            })
            .await
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_login_by_username() {
        let state = state_with_user("alice", "a@x.com", "secret1").await;

        let request = LoginRequest {
            username_or_email: "alice".to_string(),
            password: "secret1".to_string(),
        };

        let response = login(State(state), Json(request)).await.unwrap();
        assert!(!response.token.is_empty());
        assert_eq!(response.user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_by_email() {
        let state = state_with_user("alice", "a@x.com", "secret1").await;

        let request = LoginRequest {
            username_or_email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };

        let response = login(State(state), Json(request)).await.unwrap();
        assert_eq!(response.user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = state_with_user("alice", "a@x.com", "secret1").await;

        let request = LoginRequest {
            username_or_email: "alice".to_string(),
            password: "wrong".to_string(),
        };

        let result = login(State(state), Json(request)).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_same_error_as_wrong_password() {
        let state = state_with_user("alice", "a@x.com", "secret1").await;

        let unknown = login(
            State(state.clone()),
            Json(LoginRequest {
                username_or_email: "nobody".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .unwrap_err();

        let wrong = login(
            State(state),
            Json(LoginRequest {
                username_or_email: "alice".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_token_round_trips() {
        use crate::backend::auth::sessions::verify_token;

        let state = state_with_user("alice", "a@x.com", "secret1").await;
        let secret = state.config.jwt_secret.clone();

        let response = login(
            State(state),
            Json(LoginRequest {
                username_or_email: "alice".to_string(),
                password: "secret1".to_string(),
            }),
        )
        .await
        .unwrap();

        let claims = verify_token(&secret, &response.token).unwrap();
        assert_eq!(claims.user_id, response.user.id);
        assert_eq!(claims.username, "alice");
    }
}

/**
 * Current User Handlers
 *
 * Handlers for GET /api/user/me and PATCH /api/user/me. Both routes sit
 * behind the auth middleware, which verifies the bearer token and
 * attaches the decoded identity to the request; the handlers only read
 * that identity and talk to the store.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::register::is_valid_username;
use crate::backend::auth::store::{UserStore, UserUpdate};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::types::{UpdateProfileRequest, UserResponse};

/// Get current user handler
///
/// Returns the authenticated user's profile.
///
/// # Errors
///
/// * `404 Not Found` - Token was valid but the user no longer exists
/// * `500 Internal Server Error` - Store failure
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .get_user_by_id(identity.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", identity.user_id);
            ApiError::NotFound("User not found".to_string())
        })?;

    Ok(Json(user.into()))
}

/// Profile update handler
///
/// Applies a partial update to the authenticated user. Absent fields are
/// left unchanged; provided fields are validated with the same rules as
/// registration.
///
/// # Errors
///
/// * `400 Bad Request` - A provided field fails validation
/// * `409 Conflict` - New username or email is already taken
/// * `404 Not Found` - Token was valid but the user no longer exists
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    tracing::info!("Profile update for user: {}", identity.user_id);

    if let Some(username) = &request.username {
        if !is_valid_username(username) {
            return Err(ApiError::validation(
                "username",
                "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
        if let Some(existing) = state.store.get_user_by_username(username).await? {
            if existing.id != identity.user_id {
                tracing::warn!("Username already exists: {username}");
                return Err(ApiError::Conflict("Username already taken".to_string()));
            }
        }
    }

    if let Some(email) = &request.email {
        if !email.contains('@') {
            return Err(ApiError::validation("email", "Invalid email format"));
        }
        if let Some(existing) = state.store.get_user_by_email(email).await? {
            if existing.id != identity.user_id {
                tracing::warn!("Email already exists: {email}");
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
        }
    }

    let password_hash = match &request.password {
        Some(password) => {
            if password.len() < 6 {
                return Err(ApiError::validation(
                    "password",
                    "Password must be at least 6 characters",
                ));
            }
            Some(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
        }
        None => None,
    };

    let user = state
        .store
        .update_user(
            identity.user_id,
            UserUpdate {
                username: request.username,
                email: request.email,
                password_hash,
                favorite_driver_ids: request.favorite_driver_ids,
                favorite_team_ids: request.favorite_team_ids,
            },
        )
        .await?;

    tracing::info!("Profile updated for user: {}", user.username);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::store::NewUser;
    use crate::backend::middleware::auth::AuthenticatedUser;

    async fn state_with_user(username: &str, email: &str) -> (AppState, AuthUser) {
        let state = AppState::for_tests();
        let user = state
            .store
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: bcrypt::hash("secret1", bcrypt::DEFAULT_COST).unwrap(),
                favorite_driver_ids: vec![],
                favorite_team_ids: vec![],
            })
            .await
            .unwrap();

        let auth = AuthUser(AuthenticatedUser {
            user_id: user.id,
            username: user.username,
        });
        (state, auth)
    }

    #[tokio::test]
    async fn test_get_me() {
        let (state, auth) = state_with_user("alice", "a@x.com").await;

        let user = get_me(State(state), auth).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_get_me_deleted_user() {
        let state = AppState::for_tests();
        let auth = AuthUser(AuthenticatedUser {
            user_id: 12345,
            username: "ghost".to_string(),
        });

        let result = get_me(State(state), auth).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_favorites_round_trip() {
        let (state, auth) = state_with_user("alice", "a@x.com").await;
        let identity = auth.0.clone();

        let request = UpdateProfileRequest {
            favorite_driver_ids: Some(vec!["hamilton".to_string(), "alonso".to_string()]),
            ..Default::default()
        };
        update_me(State(state.clone()), AuthUser(identity.clone()), Json(request))
            .await
            .unwrap();

        let user = get_me(State(state), AuthUser(identity)).await.unwrap();
        assert_eq!(
            user.favorite_driver_ids,
            vec!["hamilton".to_string(), "alonso".to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let (state, _) = state_with_user("alice", "a@x.com").await;
        let bob = state
            .store
            .create_user(NewUser {
                username: "bob".to_string(),
                email: "b@x.com".to_string(),
                password_hash: bcrypt::hash("secret1", bcrypt::DEFAULT_COST).unwrap(),
                favorite_driver_ids: vec![],
                favorite_team_ids: vec![],
            })
            .await
            .unwrap();
        let bob_auth = AuthUser(AuthenticatedUser {
            user_id: bob.id,
            username: bob.username,
        });

        let request = UpdateProfileRequest {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        let result = update_me(State(state), bob_auth, Json(request)).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let (state, auth) = state_with_user("alice", "a@x.com").await;

        let request = UpdateProfileRequest {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        let user = update_me(State(state), auth, Json(request)).await.unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_update_short_password_rejected() {
        let (state, auth) = state_with_user("alice", "a@x.com").await;

        let request = UpdateProfileRequest {
            password: Some("short".to_string()),
            ..Default::default()
        };
        let result = update_me(State(state), auth, Json(request)).await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}

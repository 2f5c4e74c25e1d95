/**
 * Registration Handler
 *
 * This module implements user registration for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username format, email format and password length
 * 2. Check that neither the username nor the email is taken
 * 3. Hash password using bcrypt
 * 4. Create user in the store
 *
 * Registration does not authenticate: no token is returned, and the
 * caller is expected to log in as a separate step.
 *
 * # Validation
 *
 * - Username: 3-30 chars, starts with a letter, alphanumeric + underscore
 * - Email must contain '@' (basic validation)
 * - Password must be at least 6 characters long
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::store::{NewUser, UserStore};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::types::{RegisterRequest, UserResponse};

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub(crate) fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    // Rest can be alphanumeric or underscore
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registration handler
///
/// Validates the input and creates a new user account. Returns the
/// created user without a token; login is a separate step.
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username, email, or password
/// * `409 Conflict` - Username or email already registered
/// * `500 Internal Server Error` - Store or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    tracing::info!(
        "Registration request for username: {}, email: {}",
        request.username,
        request.email
    );

    if !is_valid_username(&request.username) {
        tracing::warn!("Invalid username format: {}", request.username);
        return Err(ApiError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::validation("email", "Invalid email format"));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("Password too short");
        return Err(ApiError::validation(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    if state.store.get_user_by_username(&request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }

    if state.store.get_user_by_email(&request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = state
        .store
        .create_user(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            favorite_driver_ids: request.favorite_driver_ids.unwrap_or_default(),
            favorite_team_ids: request.favorite_team_ids.unwrap_or_default(),
        })
        .await?;

    tracing::info!("User registered successfully: {} ({})", user.username, user.email);

    Ok((StatusCode::CREATED, Json(user.into())))
}

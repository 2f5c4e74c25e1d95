/**
 * Shared Wire Types
 *
 * This module defines the request and response payloads exchanged between
 * the client library and the auth/user endpoints. Field names follow the
 * JSON wire format, so the same types serve both sides.
 */

use serde::{Deserialize, Serialize};

/// Registration request
///
/// Contains the username, email and password for user registration,
/// plus optional initial favorite selections.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (hashed before storage)
    pub password: String,
    /// Favorite driver identifiers
    #[serde(rename = "favoriteDriversIds", default, skip_serializing_if = "Option::is_none")]
    pub favorite_driver_ids: Option<Vec<String>>,
    /// Favorite team identifiers
    #[serde(rename = "favoriteTeamsIds", default, skip_serializing_if = "Option::is_none")]
    pub favorite_team_ids: Option<Vec<String>>,
}

/// Login request
///
/// The `usernameOrEmail` field accepts either a username or an email
/// address; input containing '@' is treated as an email.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    #[serde(rename = "usernameOrEmail")]
    pub username_or_email: String,
    pub password: String,
}

/// Profile update request (PATCH /api/user/me)
///
/// Every field is optional; absent fields are left unchanged.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "favoriteDriversIds", default, skip_serializing_if = "Option::is_none")]
    pub favorite_driver_ids: Option<Vec<String>>,
    #[serde(rename = "favoriteTeamsIds", default, skip_serializing_if = "Option::is_none")]
    pub favorite_team_ids: Option<Vec<String>>,
}

/// Auth response returned by the login handler
///
/// Contains the JWT token and the authenticated user.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// JWT token (7-day expiration)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
///
/// Contains user information that is safe to return to clients.
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "favoriteDriversIds", default)]
    pub favorite_driver_ids: Vec<String>,
    #[serde(rename = "favoriteTeamsIds", default)]
    pub favorite_team_ids: Vec<String>,
}

/// Prompt payload for the AI generation endpoints
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneratePromptRequest {
    pub prompt: String,
}

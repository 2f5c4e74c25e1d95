/**
 * Session Tokens
 *
 * This module handles JWT generation and validation for user sessions.
 * Tokens are stateless: nothing is persisted server-side, and a token's
 * lifecycle is bounded entirely by its embedded expiry.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Token lifetime: 7 days
const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Username
    pub username: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `secret` - HMAC signing secret
/// * `user_id` - User ID
/// * `username` - Username embedded alongside the id
///
/// # Returns
/// Signed JWT token string
pub fn create_token(
    secret: &str,
    user_id: i64,
    username: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_unix();

    let claims = Claims {
        user_id,
        username: username.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// Fails on bad structure, bad signature, or expiry. The default
/// `Validation` checks `exp`, so expired tokens are rejected regardless
/// of signature validity.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

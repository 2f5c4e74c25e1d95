/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the decoded identity to handlers.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from a verified JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Requires the exact shape `Bearer <token>`
/// 3. Verifies signature and expiry
/// 4. Attaches the identity to request extensions for use in handlers
///
/// The three checks fail with three distinct 401 responses. Verification
/// is a pure token check; no store lookup happens here.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::MissingCredential
        })?;

    // Exact shape: "Bearer <token>", nothing more, nothing less
    let mut parts = auth_header.split(' ');
    let token = match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => token,
        _ => {
            tracing::warn!("Invalid Authorization header format");
            return Err(ApiError::MalformedCredential);
        }
    };

    let claims = verify_token(&state.config.jwt_secret, token).map_err(|e| {
        tracing::warn!("Token verification failed: {e}");
        ApiError::InvalidCredential
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter to pull the identity the middleware
/// attached to the request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::MissingCredential
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::create_token;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route("/protected", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    fn request_with_auth(value: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = value {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let app = protected_app(AppState::for_tests());

        let response = app.oneshot(request_with_auth(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_header_rejected() {
        let state = AppState::for_tests();
        for bad in ["token-without-scheme", "Basic abc", "Bearer", "Bearer a b"] {
            let app = protected_app(state.clone());
            let response = app.oneshot(request_with_auth(Some(bad))).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "value: {bad}");
        }
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let app = protected_app(AppState::for_tests());

        let response = app
            .oneshot(request_with_auth(Some("Bearer not.a.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let state = AppState::for_tests();
        let token = create_token(&state.config.jwt_secret, 7, "alice").unwrap();
        let app = protected_app(state);

        let response = app
            .oneshot(request_with_auth(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let state = AppState::for_tests();
        let token = create_token("some-other-secret", 7, "alice").unwrap();
        let app = protected_app(state);

        let response = app
            .oneshot(request_with_auth(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

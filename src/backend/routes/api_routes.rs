/**
 * API Route Handlers
 *
 * This module wires the auth, user, and AI endpoints:
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration (no token issued)
 * - `POST /api/auth/login` - User login, returns JWT + user
 *
 * ## User (bearer-protected)
 * - `GET /api/user/me` - Current user info
 * - `PATCH /api/user/me` - Profile update
 *
 * ## AI
 * - `POST /api/ai/generate-news` - Prompt to news text
 * - `POST /api/ai/generate-image` - Prompt to PNG bytes
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::backend::ai::handlers::{generate_image, generate_news};
use crate::backend::auth::{get_me, login, register, update_me};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// The user routes sit behind the auth middleware; everything else here
/// is public. The middleware runs only for routes registered on the
/// protected sub-router, so a missing token elsewhere costs nothing.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let user_routes = Router::new()
        .route("/api/user/me", get(get_me).patch(update_me))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Protected user endpoints
        .merge(user_routes)
        // AI endpoints
        .route("/api/ai/generate-news", post(generate_news))
        .route("/api/ai/generate-image", post(generate_image))
}

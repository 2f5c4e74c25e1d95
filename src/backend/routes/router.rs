/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (auth, user, AI)
 * 2. F1 proxy routes
 * 3. Fallback handler (404 JSON body)
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::f1_routes::configure_f1_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (credential store, upstream client,
///   AI service, config)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router, &app_state);
    let router = configure_f1_routes(router);

    router
        .fallback(|| async {
            (StatusCode::NOT_FOUND, Json(serde_json::json!({ "message": "Not found" })))
                .into_response()
        })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: credential store loading, service clients, and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Load the credential store (PostgreSQL, or in-memory fallback)
 * 2. Build the upstream F1 API client and the AI provider client
 * 3. Assemble application state
 * 4. Create the router with all routes and middleware
 *
 * # Error Handling
 *
 * Initialization is resilient: a missing or unreachable database
 * downgrades to the in-memory store rather than aborting startup.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::ai::AiService;
use crate::backend::proxy::UpstreamClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, Config};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Startup configuration, usually [`Config::from_env`]
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: Config) -> Router<()> {
    tracing::info!("Initializing pitwall backend server");

    let store = load_store(&config).await;
    let upstream = UpstreamClient::new(&config.f1_api_url);
    let ai = AiService::new(&config.ai_api_url, &config.ai_api_key);

    let app_state = AppState {
        store,
        upstream,
        ai,
        config: Arc::new(config),
    };

    tracing::info!("Router configured");

    create_router(app_state)
}

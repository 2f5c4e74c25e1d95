/**
 * Application State Management
 *
 * This module defines the application state structure shared across all
 * request handlers.
 *
 * # Thread Safety
 *
 * The state is cloned per request by Axum; every field is either a
 * cheap handle (`Arc`) or an internally-pooled client, so cloning is
 * inexpensive and no cross-request mutable state exists here.
 */

use std::sync::Arc;

use crate::backend::ai::AiService;
use crate::backend::auth::store::UserStore;
use crate::backend::proxy::UpstreamClient;
use crate::backend::server::config::Config;

/// Central state container for the application
#[derive(Clone)]
pub struct AppState {
    /// Credential store (PostgreSQL or in-memory)
    pub store: Arc<dyn UserStore>,
    /// Client for the upstream F1 data API
    pub upstream: UpstreamClient,
    /// Client for the generative-AI provider
    pub ai: AiService,
    /// Startup configuration
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// State backed by the in-memory store and unroutable service URLs,
    /// for handler-level unit tests.
    pub fn for_tests() -> Self {
        use crate::backend::auth::store::MemoryUserStore;

        let config = Config {
            jwt_secret: "test-secret".to_string(),
            f1_api_url: "http://127.0.0.1:9/api/".to_string(),
            ai_api_url: "http://127.0.0.1:9".to_string(),
            ai_api_key: "test-key".to_string(),
            port: 0,
            database_url: None,
        };

        Self {
            store: Arc::new(MemoryUserStore::new()),
            upstream: UpstreamClient::new(&config.f1_api_url),
            ai: AiService::new(&config.ai_api_url, &config.ai_api_key),
            config: Arc::new(config),
        }
    }
}

/**
 * Server Configuration
 *
 * This module handles loading server configuration from the process
 * environment at startup, and initializing the credential store.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development when possible.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Without a reachable database the server falls back to an in-memory
 * credential store and continues.
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::auth::store::{MemoryUserStore, PgUserStore, UserStore};

/// Default upstream F1 data API
const DEFAULT_F1_API_URL: &str = "https://f1api.dev/api/";
/// Default generative-AI provider endpoint
const DEFAULT_AI_API_URL: &str = "https://generativelanguage.googleapis.com";
/// Default listening port
const DEFAULT_PORT: u16 = 4200;

/// Server configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Base URL of the upstream F1 data API
    pub f1_api_url: String,
    /// Base URL of the generative-AI provider
    pub ai_api_url: String,
    /// API key for the generative-AI provider
    pub ai_api_key: String,
    /// Listening port
    pub port: u16,
    /// PostgreSQL connection string; absent means in-memory store
    pub database_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development default");
            "secret".to_string()
        });

        let ai_api_key = std::env::var("GOOGLE_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("GOOGLE_API_KEY not set. AI generation will fail upstream.");
            String::new()
        });

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            jwt_secret,
            f1_api_url: std::env::var("F1_API_URL")
                .unwrap_or_else(|_| DEFAULT_F1_API_URL.to_string()),
            ai_api_url: std::env::var("AI_API_URL")
                .unwrap_or_else(|_| DEFAULT_AI_API_URL.to_string()),
            ai_api_key,
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }
}

/// Initialize the credential store
///
/// This function:
/// 1. Connects to PostgreSQL when `DATABASE_URL` is configured
/// 2. Runs database migrations
/// 3. Falls back to the in-memory store on any failure
///
/// # Returns
///
/// A store handle; the server always gets one, possibly non-persistent.
pub async fn load_store(config: &Config) -> Arc<dyn UserStore> {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Using in-memory credential store.");
            return Arc::new(MemoryUserStore::new());
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {e:?}");
            tracing::warn!("Falling back to in-memory credential store.");
            return Arc::new(MemoryUserStore::new());
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {e:?}");
            // Migrations might have already been applied out of band
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Arc::new(PgUserStore::new(pool))
}

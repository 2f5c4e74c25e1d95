//! Pitwall - Main Library
//!
//! Pitwall is a Formula 1 statistics service: an HTTP API that proxies a
//! third-party motorsport data source, handles username/password
//! authentication with JWT session tokens, and bridges prompts to a
//! generative-AI provider for news and image generation.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Wire types used by both the server and the client
//!   - Auth request/response payloads
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with auth, proxy, and AI routes
//!   - JWT issuance and verification middleware
//!   - Credential store (PostgreSQL or in-memory)
//!
//! - **`client`** - Native client library
//!   - Session manager with persisted token and rehydration
//!   - Query cache with request de-duplication and tag invalidation
//!   - Typed accessors for the F1 data endpoints
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use pitwall::backend::server::config::Config;
//! use pitwall::backend::server::init::create_app;
//!
//! # async fn example() {
//! let config = Config::from_env();
//! let app = create_app(config).await;
//! // Use app with Axum server
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use pitwall::client::config::ClientConfig;
//! use pitwall::client::session::SessionManager;
//!
//! # async fn example() {
//! let mut session = SessionManager::new(ClientConfig::default());
//! session.fetch_current_user().await;
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod shared;

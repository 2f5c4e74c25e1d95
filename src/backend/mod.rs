//! Backend server: auth, user, F1 proxy, and AI routes over Axum.

pub mod ai;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod server;

//! Middleware for the backend server.

pub mod auth;

//! Error types for the backend server.
//!
//! All handlers converge on [`types::ApiError`], which carries the full
//! failure taxonomy (credential, validation, upstream, provider-shape)
//! and renders itself as a JSON response.

pub mod types;

pub use types::{ApiError, ProviderShapeError};

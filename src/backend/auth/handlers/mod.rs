//! Handler functions for authentication and user endpoints.
//!
//! Request/response payloads live in [`crate::shared::types`] so the
//! client library speaks the same wire types.

pub mod login;
pub mod me;
pub mod register;

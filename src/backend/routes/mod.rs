//! Route configuration for the backend server.

pub mod api_routes;
pub mod f1_routes;
pub mod router;

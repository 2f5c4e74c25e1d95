//! Types shared between the backend and the client library.

pub mod types;

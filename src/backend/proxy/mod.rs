//! Data proxy layer over the third-party F1 statistics API.

pub mod upstream;

pub use upstream::UpstreamClient;

use std::path::PathBuf;

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4200";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    server_url: String,
    storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let server_url = std::env::var("CLIENT_API_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self {
            server_url,
            storage_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pointing at an explicit server URL
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            storage_path: None,
        }
    }

    /// Override where the session token is persisted
    pub fn storage_path(mut self, path: PathBuf) -> Self {
        self.storage_path = Some(path);
        self
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub(crate) fn storage_path_override(&self) -> Option<&PathBuf> {
        self.storage_path.as_ref()
    }
}

/**
 * Token Storage
 *
 * Persists the session token as a single string under a fixed key in
 * the platform data directory, so identity survives restarts. Failures
 * are logged and tolerated: a client without persisted state behaves
 * like a fresh login.
 */

use std::fs;
use std::path::PathBuf;

/// Fixed storage key for the persisted session token
const TOKEN_KEY: &str = "pitwall_token";

/// File-backed token storage
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Storage under the platform data directory
    pub fn new() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("pitwall").join(TOKEN_KEY),
        }
    }

    /// Storage at an explicit path (used by tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist the token, replacing any previous value
    pub fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("Failed to create token storage directory: {e}");
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!("Failed to persist session token: {e}");
        }
    }

    /// Read the persisted token, if any
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) if !token.is_empty() => Some(token),
            _ => None,
        }
    }

    /// Remove the persisted token
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to clear session token: {e}");
            }
        }
    }
}

impl Default for TokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * Upstream F1 API Client
 *
 * Thin passthrough client for the third-party motorsport data source.
 * Responses are relayed verbatim as JSON; any transport failure or
 * non-2xx status collapses into the uniform upstream error so callers
 * can present a single "service unavailable" state.
 */

use std::time::Duration;

use serde_json::Value;

use crate::backend::error::ApiError;

/// Fixed request timeout for upstream calls
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the upstream data source
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client rooted at `base_url`
    ///
    /// The base URL is normalized to end with a slash so relative paths
    /// join cleanly.
    pub fn new(base_url: &str) -> Self {
        let client = match reqwest::Client::builder().timeout(UPSTREAM_TIMEOUT).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build upstream client with timeout: {e}");
                reqwest::Client::new()
            }
        };

        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Self { client, base_url }
    }

    /// Fetch a path from the upstream API and relay its JSON body.
    ///
    /// No retry, no schema validation; defensive access to optional
    /// fields is the caller's responsibility.
    pub async fn fetch(&self, path: &str) -> Result<Value, ApiError> {
        self.fetch_with_query(path, &[]).await
    }

    /// Like [`fetch`](Self::fetch), with URL-encoded query parameters.
    pub async fn fetch_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).query(query).send().await.map_err(|e| {
            tracing::error!("[F1 API] {path} - {e}");
            ApiError::upstream_data()
        })?;

        if !response.status().is_success() {
            tracing::error!("[F1 API] {path} - upstream returned {}", response.status());
            return Err(ApiError::upstream_data());
        }

        let data = response.json::<Value>().await.map_err(|e| {
            tracing::error!("[F1 API] {path} - invalid JSON body: {e}");
            ApiError::upstream_data()
        })?;

        Ok(data)
    }
}

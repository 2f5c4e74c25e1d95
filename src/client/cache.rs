/**
 * Query Cache
 *
 * Request de-duplication layer over the data endpoints, keyed by
 * endpoint and arguments. Identical in-flight requests are coalesced
 * into a single fetch whose result every caller shares; completed
 * results are served from cache until invalidated.
 *
 * Invalidation is manual, by tag: each key registers under a resource
 * tag, and `invalidate(tag)` drops every key in that group. There is no
 * cancellation; a superseded result is simply ignored by the caller.
 */

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

use crate::client::api::ClientError;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Default TTL for cached entries.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Resource groups for manual invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Drivers,
    Teams,
    Races,
    Standings,
    Results,
}

/// De-duplicating response cache
pub struct QueryCache {
    cache: Cache<String, Value>,
    tags: Mutex<HashMap<Tag, HashSet<String>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(DEFAULT_CACHE_CAPACITY)
                .time_to_live(DEFAULT_TTL)
                .build(),
            tags: Mutex::new(HashMap::new()),
        }
    }

    /// Get a cached value or fetch and cache it.
    ///
    /// Concurrent calls with the same key share one in-flight fetch.
    /// Failed fetches are not cached, so the next call retries.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        tag: Tag,
        fetch: F,
    ) -> Result<Value, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ClientError>>,
    {
        self.register_key(tag, key);

        self.cache
            .try_get_with(key.to_string(), async {
                tracing::debug!(key = %key, "cache miss, fetching");
                fetch().await
            })
            .await
            .map_err(|e: std::sync::Arc<ClientError>| (*e).clone())
    }

    /// Drop every cached entry registered under `tag`.
    pub async fn invalidate(&self, tag: Tag) {
        let keys: Vec<String> = {
            let mut tags = self.tags.lock().unwrap_or_else(|e| e.into_inner());
            tags.remove(&tag).map(|set| set.into_iter().collect()).unwrap_or_default()
        };

        for key in keys {
            self.cache.invalidate(&key).await;
        }
    }

    fn register_key(&self, tag: Tag, key: &str) {
        let mut tags = self.tags.lock().unwrap_or_else(|e| e.into_inner());
        tags.entry(tag).or_default().insert(key.to_string());
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

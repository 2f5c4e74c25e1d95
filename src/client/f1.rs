/**
 * F1 Data Queries
 *
 * Typed query functions over the proxy endpoints, each routed through
 * the query cache under its resource tag. Payloads stay raw JSON: the
 * server relays upstream bodies verbatim, and defensive access to
 * optional fields is the caller's responsibility.
 */

use serde_json::Value;

use crate::client::api::{ApiClient, ClientError};
use crate::client::cache::{QueryCache, Tag};
use crate::client::config::ClientConfig;

/// Cached client for the F1 data endpoints
pub struct F1Client {
    api: ApiClient,
    cache: QueryCache,
}

impl F1Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config),
            cache: QueryCache::new(),
        }
    }

    async fn query(&self, path: &str, tag: Tag) -> Result<Value, ClientError> {
        self.cache
            .get_or_fetch(path, tag, || self.api.get_json(path))
            .await
    }

    /// Invalidate every cached entry for a resource group
    pub async fn invalidate(&self, tag: Tag) {
        self.cache.invalidate(tag).await;
    }

    // Drivers

    pub async fn drivers(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/drivers", Tag::Drivers).await
    }

    pub async fn driver(&self, driver_id: &str) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/drivers/{driver_id}"), Tag::Drivers).await
    }

    pub async fn search_drivers(&self, q: &str) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/drivers/search?q={q}"), Tag::Drivers).await
    }

    // Teams

    pub async fn teams(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/teams", Tag::Teams).await
    }

    pub async fn team(&self, team_id: &str) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/teams/{team_id}"), Tag::Teams).await
    }

    pub async fn team_drivers(&self, team_id: &str) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/teams/{team_id}/drivers"), Tag::Teams).await
    }

    pub async fn search_teams(&self, q: &str) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/teams/search?q={q}"), Tag::Teams).await
    }

    // Last-event session results

    pub async fn last_fp1(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/fp1", Tag::Results).await
    }

    pub async fn last_fp2(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/fp2", Tag::Results).await
    }

    pub async fn last_fp3(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/fp3", Tag::Results).await
    }

    pub async fn last_qualy(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/qualy", Tag::Results).await
    }

    pub async fn last_race(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/race", Tag::Results).await
    }

    pub async fn last_sprint_qualy(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/sprint/qualy", Tag::Results).await
    }

    pub async fn last_sprint_race(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/last/sprint/race", Tag::Results).await
    }

    // Standings

    pub async fn standings_drivers(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/standings/drivers", Tag::Standings).await
    }

    pub async fn standings_teams(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/standings/teams", Tag::Standings).await
    }

    // Races

    pub async fn races(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/races", Tag::Races).await
    }

    pub async fn races_last(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/races/last", Tag::Races).await
    }

    pub async fn races_next(&self) -> Result<Value, ClientError> {
        self.query("/api/f1api/races/next", Tag::Races).await
    }

    pub async fn races_year(&self, year: u32) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/races/{year}"), Tag::Races).await
    }

    pub async fn races_year_round(&self, year: u32, round: u32) -> Result<Value, ClientError> {
        self.query(&format!("/api/f1api/races/{year}/{round}"), Tag::Races).await
    }
}

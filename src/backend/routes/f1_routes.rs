// F1 Data Proxy Routes
//
// This module maps the public F1 data endpoints onto upstream API paths
// and relays responses verbatim. Two route groups exist:
//
// - `/api/f1/*` - the original coarse endpoints (drivers, standings)
// - `/api/f1api/*` - the full per-resource surface the client queries
//
// Every handler is a passthrough: upstream JSON on success, the uniform
// 502 upstream-error body otherwise.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn drivers(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("drivers").await?))
}

async fn driver_by_id(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(&format!("drivers/{driver_id}")).await?))
}

async fn search_drivers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .upstream
            .fetch_with_query("drivers/search", &[("q", &query.q)])
            .await?,
    ))
}

async fn teams(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("teams").await?))
}

async fn team_by_id(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(&format!("teams/{team_id}")).await?))
}

async fn team_drivers(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(&format!("teams/{team_id}/drivers")).await?))
}

async fn search_teams(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .upstream
            .fetch_with_query("teams/search", &[("q", &query.q)])
            .await?,
    ))
}

async fn last_session(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(&format!("current/last/{session}")).await?))
}

async fn last_sprint_session(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .upstream
            .fetch(&format!("current/last/sprint/{session}"))
            .await?,
    ))
}

async fn standings_drivers(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("current/drivers-championship").await?))
}

async fn standings_teams(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("current/constructors-championship").await?))
}

async fn races(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("current").await?))
}

async fn races_last(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("current/last").await?))
}

async fn races_next(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch("current/next").await?))
}

async fn races_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(&year).await?))
}

async fn races_year_round(
    State(state): State<AppState>,
    Path((year, round)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(&format!("{year}/{round}")).await?))
}

/// Configure the F1 proxy routes
///
/// # Routes
///
/// ## Coarse endpoints
/// - `GET /api/f1/drivers`
/// - `GET /api/f1/standings/drivers`
/// - `GET /api/f1/standings/teams`
///
/// ## Per-resource endpoints
/// - `GET /api/f1api/drivers[/{id}|/search?q=]`
/// - `GET /api/f1api/teams[/{id}|/{id}/drivers|/search?q=]`
/// - `GET /api/f1api/last/{session}` and `GET /api/f1api/last/sprint/{session}`
/// - `GET /api/f1api/standings/{drivers,teams}`
/// - `GET /api/f1api/races[/last|/next|/{year}[/{round}]]`
pub fn configure_f1_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Coarse endpoints
        .route("/api/f1/drivers", get(drivers))
        .route("/api/f1/standings/drivers", get(standings_drivers))
        .route("/api/f1/standings/teams", get(standings_teams))
        // Drivers
        .route("/api/f1api/drivers", get(drivers))
        .route("/api/f1api/drivers/search", get(search_drivers))
        .route("/api/f1api/drivers/{driver_id}", get(driver_by_id))
        // Teams
        .route("/api/f1api/teams", get(teams))
        .route("/api/f1api/teams/search", get(search_teams))
        .route("/api/f1api/teams/{team_id}", get(team_by_id))
        .route("/api/f1api/teams/{team_id}/drivers", get(team_drivers))
        // Last-event session results
        .route("/api/f1api/last/sprint/{session}", get(last_sprint_session))
        .route("/api/f1api/last/{session}", get(last_session))
        // Standings
        .route("/api/f1api/standings/drivers", get(standings_drivers))
        .route("/api/f1api/standings/teams", get(standings_teams))
        // Races
        .route("/api/f1api/races", get(races))
        .route("/api/f1api/races/last", get(races_last))
        .route("/api/f1api/races/next", get(races_next))
        .route("/api/f1api/races/{year}", get(races_year))
        .route("/api/f1api/races/{year}/{round}", get(races_year_round))
}

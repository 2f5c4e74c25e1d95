/**
 * AI Route Handlers
 *
 * Handlers for POST /api/ai/generate-news and POST /api/ai/generate-image.
 * Empty prompts are rejected here before the service is invoked, so the
 * validation error carries the request context rather than a provider one.
 */

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::types::GeneratePromptRequest;

/// Generate F1 news text for a prompt
///
/// Returns `{"news": <raw provider text>}`; parsing the text into
/// structured news items is the client's concern.
pub async fn generate_news(
    State(state): State<AppState>,
    Json(request): Json<GeneratePromptRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.prompt.is_empty() {
        return Err(ApiError::validation("prompt", "Prompt is required"));
    }

    let news = state.ai.generate_text(&request.prompt).await?;

    Ok(Json(serde_json::json!({ "news": news })))
}

/// Generate an image for a prompt
///
/// Responds with the decoded image bytes as `image/png`.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<GeneratePromptRequest>,
) -> Result<Response, ApiError> {
    if request.prompt.is_empty() {
        return Err(ApiError::validation("prompt", "Prompt is required"));
    }

    let bytes = state.ai.generate_image(&request.prompt).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
}

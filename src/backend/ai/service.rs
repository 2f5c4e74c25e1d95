/**
 * AI Content Bridge
 *
 * This module forwards prompts to a Gemini-style `generateContent`
 * endpoint for text (news) or image generation.
 *
 * The image path is the one place in the system with layered validation
 * of an external response shape: candidates, then content parts, then
 * inline image data, each missing layer failing with its own error.
 */

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::backend::error::{ApiError, ProviderShapeError};

/// Model used for news text generation
const TEXT_MODEL: &str = "gemini-3-flash-preview";
/// Model used for image generation
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<ContentRequest<'a>>,
}

#[derive(Serialize)]
struct ContentRequest<'a> {
    parts: Vec<PartRequest<'a>>,
}

#[derive(Serialize)]
struct PartRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: Option<String>,
}

/// Client for the generative-AI provider
#[derive(Clone, Debug)]
pub struct AiService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AiService {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ApiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![ContentRequest {
                parts: vec![PartRequest { text: prompt }],
            }],
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            tracing::error!("AI provider request failed: {e}");
            ApiError::Upstream("AI provider unavailable".to_string())
        })?;

        if !response.status().is_success() {
            tracing::error!("AI provider returned {}", response.status());
            return Err(ApiError::Upstream("AI provider unavailable".to_string()));
        }

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            tracing::error!("AI provider response unreadable: {e}");
            ApiError::Upstream("AI provider unavailable".to_string())
        })
    }

    /// Generate text for a prompt.
    ///
    /// Fails fast on an empty prompt, before any network call. Text from
    /// all parts of the first candidate is concatenated.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ApiError> {
        if prompt.is_empty() {
            return Err(ApiError::validation("prompt", "Prompt is required"));
        }

        let response = self.generate_content(TEXT_MODEL, prompt).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderShapeError::NoCandidates)?;

        let parts = candidate
            .content
            .map(|c| c.parts)
            .filter(|parts| !parts.is_empty())
            .ok_or(ProviderShapeError::NoContentParts)?;

        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        Ok(text)
    }

    /// Generate an image for a prompt and decode it to bytes.
    ///
    /// The provider response is validated in three stages, each failing
    /// with a distinct error:
    /// 1. at least one candidate
    /// 2. the candidate carries content parts
    /// 3. some part carries inline image data
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ApiError> {
        if prompt.is_empty() {
            return Err(ApiError::validation("prompt", "Prompt is required"));
        }

        let response = self.generate_content(IMAGE_MODEL, prompt).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderShapeError::NoCandidates)?;

        let parts = candidate
            .content
            .map(|c| c.parts)
            .filter(|parts| !parts.is_empty())
            .ok_or(ProviderShapeError::NoContentParts)?;

        let data = parts
            .into_iter()
            .filter_map(|p| p.inline_data.and_then(|d| d.data))
            .next()
            .ok_or(ProviderShapeError::NoImageData)?;

        let bytes = STANDARD.decode(data.as_bytes()).map_err(|e| {
            tracing::error!("AI image payload is not valid base64: {e}");
            ApiError::Provider(ProviderShapeError::NoImageData)
        })?;

        Ok(bytes)
    }
}

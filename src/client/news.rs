/**
 * AI News
 *
 * Client-side parsing of the generate-news response. The provider is a
 * language model, so the `news` field arrives in several shapes: a JSON
 * array, an object wrapping a `news` array, or a string containing
 * either of those as JSON. A string that is not JSON at all falls back
 * to a single item wrapping the raw text.
 *
 * Items are validated fail-closed: an empty result set or an item
 * missing its title or date is rejected as malformed.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::api::{ApiClient, ClientError};

/// News category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Race,
    Transfers,
    Teams,
    Drivers,
    Technical,
}

/// A generated news item; exists only in client memory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub date: String,
}

/// Request news generation and parse the response into items
pub async fn generate_news(api: &ApiClient, prompt: &str) -> Result<Vec<NewsItem>, ClientError> {
    let response = api.generate_news(prompt).await?;
    parse_news(&response, prompt)
}

/// Parse a `{news: ...}` response body into news items
pub fn parse_news(response: &Value, prompt: &str) -> Result<Vec<NewsItem>, ClientError> {
    let raw = response
        .get("news")
        .ok_or_else(|| ClientError::InvalidResponse("Unexpected response format from server".to_string()))?;

    let items: Vec<NewsItem> = match raw {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => items_from_value(&parsed)
                .ok_or_else(|| ClientError::InvalidResponse("Invalid JSON structure in response".to_string()))?,
            Err(_) => {
                // Model answered in prose; wrap it as a single item
                tracing::debug!("News payload is not JSON, using fallback item");
                vec![NewsItem {
                    title: if prompt.is_empty() {
                        "AI Generated News".to_string()
                    } else {
                        prompt.to_string()
                    },
                    summary: text.clone(),
                    category: Category::Race,
                    date: Utc::now().format("%Y-%m-%d").to_string(),
                }]
            }
        },
        other => items_from_value(other)
            .ok_or_else(|| ClientError::InvalidResponse("Unexpected response format from server".to_string()))?,
    };

    if items.is_empty() {
        return Err(ClientError::InvalidResponse("No news items returned".to_string()));
    }

    for item in &items {
        if item.title.is_empty() || item.date.is_empty() {
            return Err(ClientError::InvalidResponse("Malformed news item in response".to_string()));
        }
    }

    Ok(items)
}

/// Accept either a bare array or an object wrapping a `news` array
fn items_from_value(value: &Value) -> Option<Vec<NewsItem>> {
    let array = match value {
        Value::Array(_) => value,
        Value::Object(map) => map.get("news").filter(|v| v.is_array())?,
        _ => return None,
    };
    serde_json::from_value(array.clone()).ok()
}

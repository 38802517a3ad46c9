//! Gemini plugin - fetches lipstick shade recommendations for a color

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::{LipstickMatches, LipstickProduct};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";

const INVALID_JSON_MSG: &str =
    "Invalid JSON response from API. The model may have returned an unexpected format.";
const MALFORMED_DATA_MSG: &str = "Malformed lipstick data in API response";

/// Recommendation failure taxonomy, surfaced verbatim in the UI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShadeLookupError {
    #[error("Google Gemini API Key is required. Please enter it above.")]
    MissingApiKey,
    #[error("The provided API key is invalid. Please check your key and try again.")]
    InvalidApiKey,
    #[error("{0}")]
    MalformedResponse(String),
    #[error("Failed to fetch lipstick recommendations. Please check your API key and network connection.")]
    RequestFailed,
}

impl ShadeLookupError {
    pub fn kind(&self) -> &'static str {
        match self {
            ShadeLookupError::MissingApiKey => "authentication-missing",
            ShadeLookupError::InvalidApiKey => "authentication-invalid",
            ShadeLookupError::MalformedResponse(_) => "malformed-response",
            ShadeLookupError::RequestFailed => "request-failed",
        }
    }
}

/// Narrow seam to the recommendation backend so it can be swapped or mocked
#[async_trait]
pub trait ShadeProvider: Send + Sync {
    /// Ordered list of lipstick products matching a hex color
    async fn find_shades(
        &self,
        hex_color: &str,
        api_key: &str,
    ) -> Result<Vec<LipstickProduct>, ShadeLookupError>;
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Gemini-backed shade provider
pub struct GeminiProvider {
    client: Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_URL)
    }

    /// Point the provider at a different endpoint (tests use this)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShadeProvider for GeminiProvider {
    async fn find_shades(
        &self,
        hex_color: &str,
        api_key: &str,
    ) -> Result<Vec<LipstickProduct>, ShadeLookupError> {
        if api_key.trim().is_empty() {
            return Err(ShadeLookupError::MissingApiKey);
        }

        let url = format!("{}/{}:generateContent", self.base_url, GEMINI_MODEL);
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(hex_color) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": 0.5,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini request failed: {}", e);
                ShadeLookupError::RequestFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(classify_upstream_error(status.as_u16(), &body_text));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Gemini response body unreadable: {}", e);
            ShadeLookupError::MalformedResponse(INVALID_JSON_MSG.to_string())
        })?;

        let text = payload
            .first_text()
            .ok_or_else(|| ShadeLookupError::MalformedResponse(INVALID_JSON_MSG.to_string()))?;

        parse_shade_payload(text)
    }
}

/// The fixed recommendation prompt
fn build_prompt(hex_color: &str) -> String {
    format!(
        "You are a beauty expert. Find 6 popular lipstick products that closely match the color \
         with the hex code {}. For each lipstick, provide the brand name and the specific shade \
         name.",
        hex_color
    )
}

/// Structured-output schema the model is constrained to
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "lipsticks": {
                "type": "ARRAY",
                "description": "A list of lipstick products.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "brand": {
                            "type": "STRING",
                            "description": "The brand name of the lipstick."
                        },
                        "shadeName": {
                            "type": "STRING",
                            "description": "The shade name of the lipstick."
                        }
                    },
                    "required": ["brand", "shadeName"]
                }
            }
        },
        "required": ["lipsticks"]
    })
}

/// Validate and parse the model's JSON text into products
fn parse_shade_payload(text: &str) -> Result<Vec<LipstickProduct>, ShadeLookupError> {
    let trimmed = text.trim();

    if !trimmed.starts_with('{') {
        return Err(ShadeLookupError::MalformedResponse(
            INVALID_JSON_MSG.to_string(),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)
        .map_err(|_| ShadeLookupError::MalformedResponse(INVALID_JSON_MSG.to_string()))?;

    let has_lipsticks_array = value
        .get("lipsticks")
        .map(|l| l.is_array())
        .unwrap_or(false);
    if !has_lipsticks_array {
        return Err(ShadeLookupError::MalformedResponse(
            MALFORMED_DATA_MSG.to_string(),
        ));
    }

    let matches: LipstickMatches = serde_json::from_value(value)
        .map_err(|_| ShadeLookupError::MalformedResponse(MALFORMED_DATA_MSG.to_string()))?;

    Ok(matches.lipsticks)
}

/// Map an upstream error body onto the failure taxonomy
fn classify_upstream_error(status: u16, body: &str) -> ShadeLookupError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    if message.contains("API key not valid") {
        return ShadeLookupError::InvalidApiKey;
    }

    error!("Gemini call failed with status {}: {}", status, message);
    ShadeLookupError::RequestFailed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_key_fails_before_any_request() {
        // base URL points nowhere reachable; an attempted call would error
        // differently, so MissingApiKey proves the early return
        let provider = GeminiProvider::with_base_url("http://127.0.0.1:1");

        let result = provider.find_shades("#ff0000", "   ").await;
        assert_eq!(result, Err(ShadeLookupError::MissingApiKey));
    }

    #[test]
    fn test_parse_valid_payload() {
        let text = r#"{"lipsticks":[{"brand":"Acme","shadeName":"Red Hot"}]}"#;
        let products = parse_shade_payload(text).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].brand, "Acme");
        assert_eq!(products[0].shade_name, "Red Hot");
    }

    #[test]
    fn test_parse_rejects_non_object_text() {
        let result = parse_shade_payload("I cannot help with that.");
        assert_eq!(result.unwrap_err().kind(), "malformed-response");

        let result = parse_shade_payload(r#"[{"brand":"Acme"}]"#);
        assert_eq!(result.unwrap_err().kind(), "malformed-response");
    }

    #[test]
    fn test_parse_rejects_missing_lipsticks_array() {
        let result = parse_shade_payload(r#"{"ok":true}"#);
        assert_eq!(
            result,
            Err(ShadeLookupError::MalformedResponse(
                MALFORMED_DATA_MSG.to_string()
            ))
        );

        let result = parse_shade_payload(r#"{"lipsticks":{"brand":"Acme"}}"#);
        assert_eq!(result.unwrap_err().kind(), "malformed-response");
    }

    #[test]
    fn test_parse_rejects_wrong_item_shape() {
        let result = parse_shade_payload(r#"{"lipsticks":[{"brand":"Acme"}]}"#);
        assert_eq!(result.unwrap_err().kind(), "malformed-response");
    }

    #[test]
    fn test_classify_invalid_key_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            classify_upstream_error(400, body),
            ShadeLookupError::InvalidApiKey
        );
    }

    #[test]
    fn test_classify_other_errors_collapse() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
        assert_eq!(
            classify_upstream_error(503, body),
            ShadeLookupError::RequestFailed
        );

        assert_eq!(
            classify_upstream_error(500, "<html>gateway error</html>"),
            ShadeLookupError::RequestFailed
        );
    }

    #[test]
    fn test_error_messages_read_for_the_ui() {
        assert_eq!(
            ShadeLookupError::MissingApiKey.to_string(),
            "Google Gemini API Key is required. Please enter it above."
        );
        assert_eq!(
            ShadeLookupError::InvalidApiKey.to_string(),
            "The provided API key is invalid. Please check your key and try again."
        );
        assert_eq!(ShadeLookupError::MissingApiKey.kind(), "authentication-missing");
        assert_eq!(ShadeLookupError::RequestFailed.kind(), "request-failed");
    }

    #[test]
    fn test_prompt_embeds_hex() {
        let prompt = build_prompt("#ab12cd");
        assert!(prompt.contains("#ab12cd"));
        assert!(prompt.contains("6 popular lipstick products"));
    }

    #[test]
    fn test_schema_shape() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"][0], "lipsticks");
        assert_eq!(
            schema["properties"]["lipsticks"]["items"]["required"][1],
            "shadeName"
        );
    }
}

//! Gemini generative-text client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::TextGenerator;

/// Default Gemini REST base URL
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_url: &str, model: &str, api_key: Option<&str>) -> Self {
        Self::with_client(Client::new(), api_url, model, api_key)
    }

    /// Create a Gemini client on an existing connection pool
    pub fn with_client(client: Client, api_url: &str, model: &str, api_key: Option<&str>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Build generateContent URL
    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response("Gemini", response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        parsed.into_text().ok_or(ApiError::EmptyResponse)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ==================== API Types ====================

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| serde_json::json!({ "text": t })).collect();
        serde_json::json!({
            "candidates": [{"content": {"parts": parts, "role": "model"}, "finishReason": "STOP"}]
        })
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_joins_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "secret"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "Say hi"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(&["Mer", "haba"])))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&format!("{}/v1beta/", server.uri()), DEFAULT_MODEL, Some("secret"));
        assert_eq!(client.generate("Say hi").await.unwrap(), "Merhaba");
    }

    #[tokio::test]
    async fn test_missing_key_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(&["unused"])))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&server.uri(), DEFAULT_MODEL, None);
        assert!(!client.is_configured());
        assert!(matches!(client.generate("x").await, Err(ApiError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&server.uri(), DEFAULT_MODEL, Some("k"));
        assert!(matches!(client.generate("x").await, Err(ApiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&server.uri(), DEFAULT_MODEL, Some("bad"));
        match client.generate("x").await {
            Err(ApiError::Status { service, status, .. }) => {
                assert_eq!(service, "Gemini");
                assert_eq!(status, 400);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

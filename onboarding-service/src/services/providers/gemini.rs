//! Gemini AI provider implementation.
//!
//! Implements single-shot text generation against Google's Gemini
//! `generateContent` REST endpoint.

use super::{ProviderError, TextProvider};
use crate::config::GeminiSettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini provider configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl From<&GeminiSettings> for GeminiConfig {
    fn from(settings: &GeminiSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("Gemini API key not configured".to_string()))
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str, api_key: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.api_base, self.config.model, method, api_key
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e.without_url())))?;

        if let Some(usage) = &api_response.usage_metadata {
            tracing::debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        extract_text(api_response)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let api_key = self.api_key()?;

        // Listing models verifies the key without spending tokens
        let url = format!("{}/models?key={}", self.config.api_base, api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
        return Err(ProviderError::ContentFiltered);
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ProviderError::ContentFiltered);
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(text)
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn text_parts_are_concatenated() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Your 30s "}, {"text": "demand precision."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 80, "candidatesTokenCount": 6}
            }"#,
        );
        assert_eq!(extract_text(response).unwrap(), "Your 30s demand precision.");
    }

    #[test]
    fn safety_finish_is_content_filtered() {
        let response = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::ContentFiltered)
        ));
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let response = parse(r#"{"promptFeedback": {"blockReason": "OTHER"}}"#);
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::ContentFiltered)
        ));
    }

    #[test]
    fn no_candidates_is_empty() {
        let response = parse(r#"{"candidates": []}"#);
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn request_body_matches_gemini_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("hello".to_string()),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[tokio::test]
    async fn unconfigured_provider_refuses_to_call() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: None,
            model: "gemini-flash-latest".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        assert!(!provider.is_configured());
        assert!(matches!(
            provider.generate("hi").await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}

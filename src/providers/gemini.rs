use std::time::Duration;

use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::openai::classify_http_error;
use crate::providers::ProviderClient;

/// Gemini client for interacting with the generateContent API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Model identifier to use
    model: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Conversation turns for the current session
    contents: Vec<GeminiContent>,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    /// The conversation turns
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Role of the turn (user, model)
    pub role: String,

    /// Content parts of the turn
    pub parts: Vec<GeminiPart>,
}

/// Text part within a conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text content
    pub text: String,
}

/// Generation parameters
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,

    /// Temperature for generation
    temperature: f32,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    /// The generated candidates
    pub candidates: Vec<GeminiCandidate>,
}

/// Individual candidate in a Gemini response
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The generated content
    pub content: GeminiContent,
}

impl GeminiContent {
    /// Build a single-part turn
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

impl Gemini {
    /// Maximum tokens requested per check response
    const MAX_OUTPUT_TOKENS: u32 = 500;

    /// Sampling temperature for check responses
    const TEMPERATURE: f32 = 0.3;

    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            contents: Vec::new(),
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };
        format!("{}/v1beta/models/{}:generateContent", base, self.model)
    }

    /// Run a generateContent request against the given turn list
    async fn generate(
        &self,
        contents: Vec<GeminiContent>,
        max_output_tokens: u32,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let request = GenerateContentRequest {
            contents,
            generation_config: Some(GenerationConfig {
                max_output_tokens,
                temperature: Self::TEMPERATURE,
            }),
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::ConnectionError(format!(
                    "Failed to send request to Gemini API: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(classify_http_error(status.as_u16(), error_text));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                ProviderError::ParseError(format!("Failed to parse Gemini API response: {}", e))
            })
    }

    /// Extract the reply text from a Gemini response
    fn extract_text(response: &GenerateContentResponse) -> Result<String, ProviderError> {
        response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
                    .trim()
                    .to_string()
            })
            .ok_or_else(|| {
                ProviderError::ParseError("Gemini response contained no candidates".to_string())
            })
    }

    /// Fold a call outcome into the session turns.
    ///
    /// A successful reply is appended as the model turn. On any failure the
    /// pending user turn is removed; two consecutive user turns would be
    /// rejected outright by the multi-turn API on the next call.
    fn record_outcome(
        &mut self,
        outcome: Result<String, ProviderError>,
    ) -> Result<String, ProviderError> {
        match outcome {
            Ok(text) => {
                self.contents.push(GeminiContent::text("model", &text));
                Ok(text)
            }
            Err(e) => {
                self.contents.pop();
                Err(e)
            }
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for Gemini {
    async fn send_message(&mut self, prompt: &str) -> Result<String, ProviderError> {
        self.contents.push(GeminiContent::text("user", prompt));

        let outcome = self
            .generate(self.contents.clone(), Self::MAX_OUTPUT_TOKENS)
            .await
            .and_then(|response| Self::extract_text(&response));
        self.record_outcome(outcome)
    }

    fn reset_session(&mut self) {
        self.contents.clear();
    }

    async fn verify(&self) -> Result<(), ProviderError> {
        let contents = vec![GeminiContent::text("user", "Hello")];
        self.generate(contents, 10).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

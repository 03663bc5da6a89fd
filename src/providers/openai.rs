use std::time::Duration;

use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::ProviderClient;

/// OpenAI client for interacting with the chat completions API
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Model identifier to use
    model: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Conversation history for the current session
    history: Vec<ChatMessage>,
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat message format shared by requests and responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (user, assistant, system)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// The generated choices
    pub choices: Vec<ChatChoice>,
}

/// Individual choice in a chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

impl OpenAI {
    /// Maximum tokens requested per check response
    const MAX_TOKENS: u32 = 500;

    /// Sampling temperature for check responses
    const TEMPERATURE: f32 = 0.3;

    /// Create a new OpenAI client
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
            history: Vec::new(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!(
                "{}/v1/chat/completions",
                self.endpoint.trim_end_matches('/')
            )
        }
    }

    /// Complete a chat request against the current message list
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(max_tokens),
            temperature: Some(Self::TEMPERATURE),
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::ConnectionError(format!(
                    "Failed to send request to OpenAI API: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(classify_http_error(status.as_u16(), error_text));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| {
                ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e))
            })
    }

    /// Extract the reply text from a chat completion response
    fn extract_text(response: &ChatCompletionResponse) -> Result<String, ProviderError> {
        response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| {
                ProviderError::ParseError("OpenAI response contained no choices".to_string())
            })
    }

    /// Fold a call outcome into the session history.
    ///
    /// A successful reply is appended as the assistant turn. On any failure
    /// the pending user turn is removed, so the next call in the session does
    /// not resend an unanswered user message.
    fn record_outcome(
        &mut self,
        outcome: Result<String, ProviderError>,
    ) -> Result<String, ProviderError> {
        match outcome {
            Ok(text) => {
                self.history.push(ChatMessage {
                    role: "assistant".to_string(),
                    content: text.clone(),
                });
                Ok(text)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for OpenAI {
    async fn send_message(&mut self, prompt: &str) -> Result<String, ProviderError> {
        self.history.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let outcome = self
            .complete(self.history.clone(), Self::MAX_TOKENS)
            .await
            .and_then(|response| Self::extract_text(&response));
        self.record_outcome(outcome)
    }

    fn reset_session(&mut self) {
        self.history.clear();
    }

    async fn verify(&self) -> Result<(), ProviderError> {
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: "Hello".to_string(),
        }];
        self.complete(messages, 10).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Map an HTTP error status into the provider error taxonomy
pub(crate) fn classify_http_error(status_code: u16, message: String) -> ProviderError {
    match status_code {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code,
            message,
        },
    }
}

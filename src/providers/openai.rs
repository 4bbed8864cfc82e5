/*!
 * OpenAI-compatible chat completions client.
 *
 * Works against the public OpenAI API and self-hosted OpenAI-compatible
 * servers (LM Studio and friends). Requests carry the `json_object`
 * response-format hint; transport-level failures are retried with
 * exponential backoff, while client errors fail fast.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::ChatCompleter;

/// Default public API endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// OpenAI-compatible API client
#[derive(Debug)]
pub struct OpenAiClient {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base endpoint URL (empty means the public API)
    endpoint: String,
    /// Model name to request
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Maximum number of transport retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Response format hint
#[derive(Debug, Serialize)]
struct ResponseFormat {
    /// Format type, e.g. "json_object"
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// The model to use
    model: String,
    /// The messages for the conversation
    messages: Vec<ChatMessage>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Response format hint
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    /// Create a new request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request JSON-object output
    pub fn json_response(mut self) -> Self {
        self.response_format = Some(ResponseFormat {
            format_type: "json_object".to_string(),
        });
        self
    }
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; the first one carries the content
    pub choices: Vec<ChatChoice>,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

impl OpenAiClient {
    /// Create a new client with default retry behavior
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new_with_config(api_key, endpoint, model, 0.3, 4096, 3, 1000, 120)
    }

    /// Create a new client with explicit generation and retry configuration
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
        max_retries: u32,
        backoff_base_ms: u64,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            temperature,
            max_tokens,
            max_retries,
            backoff_base_ms,
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1/chat/completions", base)
    }

    /// Complete a chat request, retrying transient failures with exponential
    /// backoff. Authentication and other client errors fail fast.
    pub async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = self.api_url();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let send_result = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await;

            // Fatal conditions return immediately; transient ones fall
            // through to the backoff below.
            let transient: ProviderError = match send_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<ChatCompletionResponse>()
                            .await
                            .map_err(|e| ProviderError::ParseError(e.to_string()));
                    }

                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error response body".to_string());
                    error!("Chat API error ({}): {}", status, message);

                    match status.as_u16() {
                        401 | 403 => {
                            return Err(ProviderError::AuthenticationError(message));
                        }
                        429 => ProviderError::RateLimitExceeded(message),
                        code if status.is_server_error() => ProviderError::ApiError {
                            status_code: code,
                            message,
                        },
                        code => {
                            return Err(ProviderError::ApiError {
                                status_code: code,
                                message,
                            });
                        }
                    }
                }
                Err(e) => ProviderError::ConnectionError(e.to_string()),
            };

            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                debug!(
                    "Chat request attempt {} failed ({}), backing off {}ms",
                    attempt, transient, backoff_ms
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            } else {
                return Err(transient);
            }
        }
    }

    /// Test the connection with a minimal request
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = ChatCompletionRequest::new(&self.model)
            .add_message("user", "Hello")
            .max_tokens(10);
        self.complete(request).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatCompleter for OpenAiClient {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Option<String>, ProviderError> {
        let request = ChatCompletionRequest::new(&self.model)
            .add_message("system", system_prompt)
            .add_message("user", user_prompt)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .json_response();

        let response = self.complete(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Chat completion used {} prompt + {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty()))
    }
}

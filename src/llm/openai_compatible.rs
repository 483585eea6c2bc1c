// ABOUTME: OpenAI-compatible chat-completions provider used for model-backed exercise selection
// ABOUTME: Maps HTTP and transport failures onto retry-aware AppError codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Speaks the `/chat/completions` API of `OpenAI` and of any server that
//! mirrors it (vLLM, `LocalAI`, Ollama's `/v1`). Requests can ask for a JSON
//! object response.
//!
//! ## Error mapping
//!
//! | Condition | `ErrorCode` |
//! |-----------|-------------|
//! | 429 | `ExternalRateLimited` |
//! | 401, 403 | `ExternalAuthFailed` |
//! | 5xx, connect failure, timeout | `ExternalServiceUnavailable` |
//! | unparsable success body, no choices | `SerializationError` |
//! | 400 | `InvalidInput` |
//! | 404 | `ResourceNotFound` |

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use pierre_core::constants::llm::{CONNECT_TIMEOUT_SECS, DEFAULT_BASE_URL};
use pierre_core::constants::service_names::LLM_SERVICE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, ResponseFormat,
    TokenUsage,
};
use crate::config::LlmConfig;
use crate::errors::AppError;

/// Characters of an error body kept in error messages
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAiResponseFormat>,
    stream: bool,
}

/// `response_format` object
#[derive(Debug, Serialize)]
struct OpenAiResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

impl From<ResponseFormat> for OpenAiResponseFormat {
    fn from(format: ResponseFormat) -> Self {
        let format_type = match format {
            ResponseFormat::Text => "text",
            ResponseFormat::JsonObject => "json_object",
        };
        Self { format_type }
    }
}

/// Message structure for the API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("request_timeout", &self.request_timeout)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl From<&LlmConfig> for OpenAiCompatibleConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            request_timeout: Duration::from_secs(config.timeout_secs),
            capabilities: LlmCapabilities::structured_chat(),
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI`-compatible chat-completions provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initializing OpenAI-compatible provider"
        );
        Ok(Self { client, config })
    }

    /// Create a provider from the engine's LLM settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, AppError> {
        Self::new(OpenAiCompatibleConfig::from(config))
    }

    fn is_openai(&self) -> bool {
        self.config.base_url.trim_end_matches('/') == DEFAULT_BASE_URL
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Log message sizes for debugging model interactions
    fn log_messages_debug(messages: &[OpenAiMessage]) {
        for (i, msg) in messages.iter().enumerate() {
            debug!(
                "Message[{i}] role={}, content_len={}",
                msg.role,
                msg.content.len()
            );
        }
    }

    /// Map a non-success HTTP response onto an error code
    ///
    /// The status decides the code; the body only supplies the message.
    #[must_use]
    pub fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect::<String>(),
            |parsed| match parsed.error.error_type {
                Some(error_type) => format!("{error_type} - {}", parsed.error.message),
                None => parsed.error.message,
            },
        );

        match status.as_u16() {
            429 => AppError::rate_limited(Self::extract_rate_limit_message(&detail)),
            401 | 403 => {
                AppError::auth_failed(LLM_SERVICE, format!("API authentication failed: {detail}"))
            }
            400 => AppError::invalid_input(format!("API validation error: {detail}")),
            404 => AppError::not_found(format!("Model or endpoint ({detail})")),
            500..=599 => AppError::external_unavailable(
                LLM_SERVICE,
                format!("Service unavailable ({status}): {detail}"),
            ),
            _ => AppError::external_service(LLM_SERVICE, format!("API error ({status}): {detail}")),
        }
    }

    /// Extract a readable rate limit message, keeping any retry-after hint
    fn extract_rate_limit_message(message: &str) -> String {
        const MARKER: &str = "try again in ";
        // ASCII lowercasing keeps byte offsets aligned with `message`
        if let Some(retry_pos) = message.to_ascii_lowercase().find(MARKER) {
            let after_prefix = &message[retry_pos + MARKER.len()..];
            let end_pos = after_prefix
                .find(|c: char| !c.is_ascii_digit() && c != '.')
                .unwrap_or(after_prefix.len());
            if let Ok(seconds) = after_prefix[..end_pos].parse::<f64>() {
                let seconds_int = seconds.ceil() as u64;
                return format!("LLM rate limit reached. Please try again in {seconds_int} seconds.");
            }
        }
        "LLM rate limit reached. Please wait a moment and try again.".to_owned()
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!(base_url = %self.config.base_url, error = %e, "LLM request failed");
        if e.is_connect() {
            AppError::external_unavailable(
                LLM_SERVICE,
                format!("Cannot connect to {}", self.config.base_url),
            )
        } else if e.is_timeout() {
            AppError::external_unavailable(LLM_SERVICE, "Request timed out")
        } else {
            AppError::external_unavailable(LLM_SERVICE, format!("Request failed: {e}"))
        }
    }

    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        let response_format = request
            .response_format
            .filter(|_| self.config.capabilities.supports_json_mode())
            .map(OpenAiResponseFormat::from);
        OpenAiRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.default_model.clone()),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
            stream: false,
        }
    }
}

/// Decode a successful chat-completions body
fn parse_completion(body: &str) -> Result<ChatResponse, AppError> {
    let response: OpenAiResponse = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(500).collect();
        error!("Failed to parse API response: {e} - body: {preview}");
        AppError::serialization(format!("Failed to parse LLM response: {e}"))
    })?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::serialization("LLM API returned no choices"))?;

    Ok(ChatResponse {
        content: choice.message.content.unwrap_or_default(),
        model: response.model,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt,
            completion_tokens: u.completion,
            total_tokens: u.total,
        }),
        finish_reason: choice.finish_reason,
    })
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        if self.is_openai() {
            "openai"
        } else {
            "openai_compatible"
        }
    }

    fn display_name(&self) -> &'static str {
        if self.is_openai() {
            "OpenAI"
        } else {
            "OpenAI-compatible endpoint"
        }
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini", "gpt-4.1"]
    }

    #[instrument(skip(self, request), fields(provider = self.name()))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let openai_request = self.build_request(request);
        Self::log_messages_debug(&openai_request.messages);

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let completion = parse_completion(&body)?;
        debug!(
            content_len = completion.content.len(),
            finish_reason = ?completion.finish_reason,
            "Received chat completion"
        );
        Ok(completion)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let request = self.client.get(self.api_url("models"));
        let response = self
            .add_auth_header(request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;
        let healthy = response.status().is_success();
        debug!(status = %response.status(), healthy, "LLM health check");
        Ok(healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_core::errors::ErrorCode;

    fn provider(base_url: &str) -> OpenAiCompatibleProvider {
        let config = LlmConfig {
            base_url: base_url.to_owned(),
            api_key: Some("sk-test".to_owned()),
            ..LlmConfig::default()
        };
        OpenAiCompatibleProvider::from_llm_config(&config).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StatusCode::TOO_MANY_REQUESTS, ErrorCode::ExternalRateLimited),
            (StatusCode::UNAUTHORIZED, ErrorCode::ExternalAuthFailed),
            (StatusCode::FORBIDDEN, ErrorCode::ExternalAuthFailed),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ExternalServiceUnavailable),
            (StatusCode::BAD_GATEWAY, ErrorCode::ExternalServiceUnavailable),
            (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
            (StatusCode::NOT_FOUND, ErrorCode::ResourceNotFound),
        ];
        for (status, expected) in cases {
            let err = OpenAiCompatibleProvider::parse_error_response(status, "<html>oops</html>");
            assert_eq!(err.code, expected, "status {status}");
        }
    }

    #[test]
    fn test_json_error_message_is_kept() {
        let body = r#"{"error":{"message":"Invalid API key","type":"invalid_request_error"}}"#;
        let err = OpenAiCompatibleProvider::parse_error_response(StatusCode::UNAUTHORIZED, body);
        assert!(err.message.contains("Invalid API key"));
    }

    #[test]
    fn test_rate_limit_retry_hint() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 1.5s."}}"#;
        let err =
            OpenAiCompatibleProvider::parse_error_response(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            err.message,
            "LLM rate limit reached. Please try again in 2 seconds."
        );
    }

    #[test]
    fn test_rate_limit_body_with_multibyte_text() {
        for body in ["İ try again in é", "ÀÉÎ TRY AGAIN IN 3s", "Ⅻ try again in"] {
            let err =
                OpenAiCompatibleProvider::parse_error_response(StatusCode::TOO_MANY_REQUESTS, body);
            assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        }
        let err = OpenAiCompatibleProvider::parse_error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "Límite İ: try again in 4s",
        );
        assert_eq!(
            err.message,
            "LLM rate limit reached. Please try again in 4 seconds."
        );
    }

    #[test]
    fn test_unparsable_success_body_is_serialization_error() {
        let err = parse_completion("not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::SerializationError);
        let err = parse_completion(r#"{"choices":[],"model":"m"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::SerializationError);
    }

    #[test]
    fn test_completion_parsed() {
        let body = r#"{"model":"gpt-4o-mini","choices":[{"message":{"content":"{}"},"finish_reason":"stop"}],"usage":{"prompt_tokens":10,"completion_tokens":2,"total_tokens":12}}"#;
        let response = parse_completion(body).unwrap();
        assert_eq!(response.content, "{}");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(12));
    }

    #[test]
    fn test_request_carries_json_format() {
        let provider = provider("https://api.openai.com/v1/");
        let request = ChatRequest::new(vec![ChatMessage::user("hi")]).with_json_response();
        let body = serde_json::to_value(provider.build_request(&request)).unwrap();
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(provider.api_url("chat/completions"), "https://api.openai.com/v1/chat/completions");
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = provider("http://localhost:8000/v1");
        let rendered = format!("{:?}", provider.config);
        assert!(!rendered.contains("sk-test"));
        assert_eq!(provider.name(), "openai_compatible");
    }
}

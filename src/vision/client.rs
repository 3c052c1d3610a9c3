//! # Inference Client
//!
//! [`InferenceClient`] is the seam between request construction and transport.
//! The production implementation, [`GroqClient`], performs one blocking HTTPS
//! POST per call. Tests substitute simulated clients.

use std::error::Error as StdError;
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;

use crate::config::{ApiKey, AssistantConfig};
use crate::error::{AssistantError, AssistantResult, InferenceFailure};
use crate::vision::prompt::DEFAULT_ENDPOINT;
use crate::vision::types::{ApiErrorBody, ChatRequest, ChatResponse};

/// Longest slice of an error body carried into a failure message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Sends one chat request and returns the first completion's text.
pub trait InferenceClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, InferenceFailure>;
}

impl<T: InferenceClient + ?Sized> InferenceClient for &T {
    fn complete(&self, request: &ChatRequest) -> Result<String, InferenceFailure> {
        (**self).complete(request)
    }
}

impl<T: InferenceClient + ?Sized> InferenceClient for Box<T> {
    fn complete(&self, request: &ChatRequest) -> Result<String, InferenceFailure> {
        (**self).complete(request)
    }
}

/// Blocking client for the Groq OpenAI-compatible chat-completions API.
pub struct GroqClient {
    http: Client,
    endpoint: String,
    api_key: ApiKey,
}

impl GroqClient {
    /// Client for the default endpoint with the transport's default timeout.
    pub fn new(api_key: ApiKey) -> AssistantResult<Self> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, None)
    }

    /// Client for an arbitrary endpoint; `timeout` overrides the transport default.
    pub fn with_endpoint(
        api_key: ApiKey,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> AssistantResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            AssistantError::config("http_client", e.to_string(), "failed to build HTTP client")
        })?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Build from a validated configuration. Fails when no credential is set.
    pub fn from_config(config: &AssistantConfig) -> AssistantResult<Self> {
        let key = config.require_api_key()?.clone();
        Self::with_endpoint(key, config.endpoint.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl InferenceClient for GroqClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, InferenceFailure> {
        info!("requesting instructions from {} (model {})", self.endpoint, request.model);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .map_err(transport_failure)?;

        let status = response.status();
        let body = response.text().map_err(transport_failure)?;
        debug!("endpoint answered {} with {} bytes", status, body.len());

        if !status.is_success() {
            return Err(InferenceFailure::from_status(
                status.as_u16(),
                error_message(&body),
            ));
        }
        parse_completion(&body)
    }
}

/// Extract the first completion's text from a success body.
pub fn parse_completion(body: &str) -> Result<String, InferenceFailure> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| InferenceFailure::malformed(format!("invalid JSON body: {}", e)))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| InferenceFailure::malformed("response contained no choices"))?;
    match choice.message.content {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(InferenceFailure::malformed("first choice has no text content")),
    }
}

/// Best human-readable message from an error body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

fn transport_failure(error: reqwest::Error) -> InferenceFailure {
    let message = error_chain(&error);
    if error.is_timeout() {
        InferenceFailure::timeout(message)
    } else {
        InferenceFailure::network(message)
    }
}

/// Join an error and its sources into one line.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

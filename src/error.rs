//! # Error Handling
//!
//! Two error families exist in the assistant:
//!
//! - [`AssistantError`]: everything that can go wrong locally (bad settings,
//!   unreadable images, encoder failures, file output). These propagate with `?`
//!   up to the binary, which reports them and exits.
//! - [`InferenceFailure`]: the typed reason a call to the inference endpoint did
//!   not produce instructions. The request layer never propagates these; it
//!   returns them inside an [`AnalysisOutcome`](crate::vision::AnalysisOutcome)
//!   so callers can branch on the failure kind without matching strings.
//!
//! ## Error Classification
//!
//! - `Retryable`: whether trying again later could plausibly succeed
//! - `HasRecoverySuggestion`: a short hint shown to the user
//!
//! Both only shape the message the binary prints after a failed request.
//! Nothing in the crate retries.
//!
//! ## Usage
//!
//! ```rust
//! use diy_assistant::error::{InferenceFailure, Retryable, HasRecoverySuggestion};
//!
//! let failure = InferenceFailure::rate_limited("quota exhausted");
//! assert!(failure.is_retryable());
//! assert!(failure.recovery_suggestion().is_some());
//! ```

use thiserror::Error;

/// Reason a single inference request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceFailure {
    /// The endpoint rejected the credential (HTTP 401/403)
    #[error("authentication failed (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    /// Rate limit or quota rejection (HTTP 429)
    #[error("rate limit or quota exceeded: {message}")]
    RateLimited { message: String },

    /// The transport gave up waiting for the endpoint
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Connection, DNS, TLS or other transport failure
    #[error("network error: {message}")]
    Network { message: String },

    /// Any other non-success HTTP status
    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The endpoint answered 2xx but the body carried no usable completion
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl InferenceFailure {
    /// Create an authentication failure
    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
        }
    }

    /// Create a rate-limit failure
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Create a timeout failure
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a network failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a generic API failure
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed-response failure
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Map a non-success HTTP status and its extracted message to a failure kind.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::auth(status, message),
            429 => Self::rate_limited(message),
            408 | 504 => Self::timeout(message),
            _ => Self::api(status, message),
        }
    }

    /// Get the failure category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "auth",
            Self::RateLimited { .. } => "rate_limited",
            Self::Timeout { .. } => "timeout",
            Self::Network { .. } => "network",
            Self::Api { .. } => "api",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

/// Base error type for the assistant library
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Configuration errors (missing credential, bad endpoint, ...)
    #[error("Configuration error in '{field}': {reason} (value: {value})")]
    Config {
        field: String,
        value: String,
        reason: String,
    },

    /// A setting fell outside its allowed range
    #[error("Validation failed for '{field}': {constraint} (value: {value})")]
    Validation {
        field: String,
        constraint: String,
        value: String,
    },

    /// The input could not be decoded as an image
    #[error("Failed to decode image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    /// Re-encoding the processed image failed
    #[error("Failed to encode image during {operation}: {source}")]
    Encode {
        operation: String,
        #[source]
        source: image::ImageError,
    },

    /// A textual payload was not valid base-64
    #[error("Invalid base64 payload: {0}")]
    Payload(#[from] base64::DecodeError),

    /// Resampling failed
    #[error("Image scaling failed: {0}")]
    Scale(#[from] diy_scale::cpu::ScaleError),

    /// I/O errors
    #[error("I/O error during {operation}{}: {source}", path_suffix(.path))]
    Io {
        operation: String,
        path: Option<String>,
        #[source]
        source: std::io::Error,
    },
}

fn path_suffix(path: &Option<String>) -> String {
    path.as_ref()
        .map(|p| format!(" on '{}'", p))
        .unwrap_or_default()
}

impl AssistantError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(
        field: impl Into<String>,
        constraint: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            constraint: constraint.into(),
            value: value.into(),
        }
    }

    /// Create a decode error
    pub fn decode(source: image::ImageError) -> Self {
        Self::Decode { source }
    }

    /// Create an encode error
    pub fn encode(operation: impl Into<String>, source: image::ImageError) -> Self {
        Self::Encode {
            operation: operation.into(),
            source,
        }
    }

    /// Create an I/O error tied to a file path
    pub fn io_at(
        operation: impl Into<String>,
        path: impl AsRef<std::path::Path>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path.as_ref().display().to_string()),
            source,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Validation { .. } => "validation",
            Self::Decode { .. } => "decode",
            Self::Encode { .. } => "encode",
            Self::Payload(_) => "payload",
            Self::Scale(_) => "scale",
            Self::Io { .. } => "io",
        }
    }
}

/// Result type alias using our custom error type
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Trait for failures that could succeed if attempted again later
pub trait Retryable {
    /// Check if this failure can be retried
    fn is_retryable(&self) -> bool;
}

impl Retryable for InferenceFailure {
    fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Auth { .. } | Self::MalformedResponse { .. } => false,
        }
    }
}

/// Trait for failures that provide recovery suggestions
pub trait HasRecoverySuggestion {
    /// Get recovery suggestion for this failure
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for InferenceFailure {
    fn recovery_suggestion(&self) -> Option<&str> {
        match self {
            Self::Auth { .. } => Some("Check that the Groq API key is correct and still active"),
            Self::RateLimited { .. } => Some("Wait a minute before trying again, or check your plan's quota"),
            Self::Timeout { .. } => Some("Try a smaller --max-size or lower --quality to shrink the upload"),
            Self::Network { .. } => Some("Check your internet connection"),
            Self::Api { status, .. } if *status >= 500 => Some("The service is having trouble; try again shortly"),
            Self::Api { .. } => None,
            Self::MalformedResponse { .. } => Some("The model returned no usable text; try again with a clearer photo"),
        }
    }
}

//! # Assistant Configuration
//!
//! [`AssistantConfig`] is the common interface between the CLI and the library:
//! the binary fills it from parsed arguments, validates it, and hands out the
//! narrower records each component needs.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Source | Description |
//! |-----------|--------|-------------|
//! | `api_key` | `--api-key` / `GROQ_API_KEY` | Credential for the inference endpoint |
//! | `image` | `--max-size`, `--quality` | Preprocessing settings |
//! | `project_type` | `--project-type` | Cosmetic label, not sent to the model |
//! | `model` | `--model` | Vision model identifier |
//! | `endpoint` | `--endpoint` | Chat-completions URL |
//! | `timeout` | `--timeout` | Optional transport timeout override |
//! | `output` | `--output` | Where the instructions file is written |
//! | `save_processed` | `--save-processed` | Optional path for the processed preview |
//!
//! ## Examples
//!
//! ```rust
//! use diy_assistant::config::{ApiKey, AssistantConfig, ImageSettings, ProjectType};
//!
//! let config = AssistantConfig::new(
//!     Some(ApiKey::new("gsk_test")),
//!     ImageSettings::new(1000, 90),
//!     ProjectType::Crafts,
//! );
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::settings::{ImageSettings, ProjectType};
use crate::error::{AssistantError, AssistantResult};
use crate::report::INSTRUCTIONS_FILE_NAME;
use crate::vision::prompt::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::vision::requester::RequestSettings;

/// API credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    /// The raw secret, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

/// Full configuration for one assistant invocation.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Credential for the inference endpoint. Not required for dry runs.
    pub api_key: Option<ApiKey>,

    /// Resize and recompression settings.
    pub image: ImageSettings,

    /// Cosmetic project category.
    pub project_type: ProjectType,

    /// Vision model identifier sent with every request.
    pub model: String,

    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Sampling temperature. Kept low so the answer stays literal.
    pub temperature: f32,

    /// Upper bound on generated tokens.
    pub max_tokens: u32,

    /// Transport timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,

    /// Destination of the exported instructions.
    pub output: PathBuf,

    /// Where to write the processed (resized) image, if anywhere.
    pub save_processed: Option<PathBuf>,
}

impl Default for AssistantConfig {
    /// 800px longest edge, JPEG quality 85.
    fn default() -> Self {
        Self {
            api_key: None,
            image: ImageSettings::default(),
            project_type: ProjectType::default(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
            output: PathBuf::from(INSTRUCTIONS_FILE_NAME),
            save_processed: None,
        }
    }
}

impl AssistantConfig {
    /// Creates a configuration with the user-facing choices and default plumbing.
    pub fn new(api_key: Option<ApiKey>, image: ImageSettings, project_type: ProjectType) -> Self {
        Self {
            api_key,
            image,
            project_type,
            ..Self::default()
        }
    }

    /// Validates everything except the presence of a credential, which only
    /// matters once a request is about to be sent (see [`Self::require_api_key`]).
    pub fn validate(&self) -> AssistantResult<()> {
        self.image.validate()?;
        if self.model.trim().is_empty() {
            return Err(AssistantError::config("model", "", "must not be empty"));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(AssistantError::config(
                "endpoint",
                self.endpoint.clone(),
                "must be an http(s) URL",
            ));
        }
        if self.max_tokens == 0 {
            return Err(AssistantError::config("max_tokens", "0", "must be greater than 0"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AssistantError::config(
                "temperature",
                self.temperature.to_string(),
                "must be between 0.0 and 2.0",
            ));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(AssistantError::config("timeout", "0", "must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the credential or a configuration error if none was supplied.
    pub fn require_api_key(&self) -> AssistantResult<&ApiKey> {
        match &self.api_key {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AssistantError::config(
                "api_key",
                "",
                "a Groq API key is required to request instructions",
            )),
        }
    }

    /// Convert to the request parameters used by the instruction requester.
    pub fn to_request_settings(&self) -> RequestSettings {
        RequestSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

//! # Instruction Requester
//!
//! Builds the single multimodal request and turns whatever the client returns
//! into an [`AnalysisOutcome`]. The requester never returns an error and never
//! retries: a failed call is one [`AnalysisOutcome::Failed`], and
//! [`AnalysisOutcome::into_text`] renders it as the user-facing
//! `"Error analyzing image: ..."` line.

use log::{info, warn};

use crate::error::InferenceFailure;
use crate::processing::EncodedPayload;
use crate::vision::client::InferenceClient;
use crate::vision::prompt::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, INSTRUCTION_PROMPT,
};
use crate::vision::types::{ChatMessage, ChatRequest, ContentPart, ImageUrl};

/// Prefix of the text shown in place of instructions when a request fails.
pub const ERROR_PREFIX: &str = "Error analyzing image:";

/// Model parameters attached to every request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Result of one instruction request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The model's answer, verbatim
    Instructions(String),
    /// Why no answer was produced
    Failed(InferenceFailure),
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Instructions(_))
    }

    pub fn instructions(&self) -> Option<&str> {
        match self {
            Self::Instructions(text) => Some(text),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&InferenceFailure> {
        match self {
            Self::Instructions(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Text to show the user: the instructions, or the error line.
    pub fn into_text(self) -> String {
        match self {
            Self::Instructions(text) => text,
            Self::Failed(failure) => format!("{} {}", ERROR_PREFIX, failure),
        }
    }
}

/// Sends the processed photo with the instruction template through a client.
pub struct InstructionRequester<C> {
    client: C,
    settings: RequestSettings,
}

impl<C: InferenceClient> InstructionRequester<C> {
    pub fn new(client: C) -> Self {
        Self::with_settings(client, RequestSettings::default())
    }

    pub fn with_settings(client: C, settings: RequestSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// One `user` message: the image as a data URI, then the instruction text.
    pub fn build_request(&self, payload: &EncodedPayload) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: payload.data_uri(),
                        },
                    },
                    ContentPart::Text {
                        text: INSTRUCTION_PROMPT.to_string(),
                    },
                ],
            }],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Perform the single blocking call.
    pub fn request(&self, payload: &EncodedPayload) -> AnalysisOutcome {
        let request = self.build_request(payload);
        info!(
            "sending {} byte image ({} base64 chars) to {}",
            payload.byte_len(),
            payload.encoded_len(),
            request.model
        );
        match self.client.complete(&request) {
            Ok(text) => AnalysisOutcome::Instructions(text),
            Err(failure) => {
                warn!("instruction request failed ({}): {}", failure.category(), failure);
                AnalysisOutcome::Failed(failure)
            }
        }
    }

    /// [`Self::request`] rendered straight to display text.
    pub fn request_text(&self, payload: &EncodedPayload) -> String {
        self.request(payload).into_text()
    }
}

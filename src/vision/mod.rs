//! # Vision Module
//!
//! One multimodal chat request per interaction: the processed photo as a data
//! URI plus a fixed instruction template, sent to a hosted vision model.
//!
//! - [`prompt`]: the instruction template and model constants
//! - [`types`]: OpenAI-compatible chat-completions wire types
//! - [`client`]: the [`InferenceClient`] seam and its HTTP implementation
//! - [`requester`]: builds the request and folds the result into an [`AnalysisOutcome`]

pub mod client;
pub mod prompt;
pub mod requester;
pub mod types;

pub use client::{GroqClient, InferenceClient};
pub use requester::{AnalysisOutcome, ERROR_PREFIX, InstructionRequester, RequestSettings};

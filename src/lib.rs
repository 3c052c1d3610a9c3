//! # DIY Project Assistant Library
//!
//! Turns a photo of furniture, a craft, or any other buildable object into
//! step-by-step building instructions by asking a hosted vision model.
//!
//! ## Architecture
//!
//! The library is organized into a few small modules:
//! - `config`: the immutable settings record and the CLI-facing configuration
//! - `processing`: resize, JPEG recompression and base-64 payload encoding
//! - `vision`: the instruction prompt, wire types, client seam and requester
//! - `session`: one-interaction orchestration (load → preprocess → request)
//! - `report`: terminal rendering and the plain-text export
//! - `error`: local errors and typed inference failures
//!
//! Data flows in a straight line; there is no shared state, no background
//! work and exactly one network call per analysis.
//!
//! ## Example
//!
//! ```rust,no_run
//! use diy_assistant::config::{ApiKey, ImageSettings, ProjectType};
//! use diy_assistant::session::AssistantSession;
//! use diy_assistant::vision::GroqClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GroqClient::new(ApiKey::new("gsk_..."))?;
//! let mut session = AssistantSession::builder()
//!     .client(client)
//!     .image_settings(ImageSettings::new(800, 85))
//!     .project_type(ProjectType::Furniture)
//!     .build()?;
//!
//! let result = session.analyze_file("bookshelf.jpg")?;
//! println!("{}", result.outcome.into_text());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod processing;
pub mod report;
pub mod session;
pub mod vision;

/// Re-export error types for convenience
pub use error::{AssistantError, AssistantResult, HasRecoverySuggestion, InferenceFailure, Retryable};

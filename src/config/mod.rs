//! # Configuration Module
//!
//! This module provides the settings record for image preprocessing and the
//! top-level assistant configuration assembled by the CLI.

pub mod config;
pub mod settings;

pub use config::{ApiKey, AssistantConfig};
pub use settings::{ImageSettings, ProjectType};

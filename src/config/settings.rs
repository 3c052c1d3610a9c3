//! # Image Settings
//!
//! The two user-adjustable knobs that shape the uploaded payload, held in one
//! immutable record and passed explicitly into every preprocessing call.
//!
//! | Parameter | Type | Range | Step | Default | Description |
//! |-----------|------|-------|------|---------|-------------|
//! | `max_edge` | `u32` | 400-1200 | 100 | 800 | Longest side of the uploaded image in pixels |
//! | `quality` | `u8` | 50-100 | 5 | 85 | JPEG quality (higher = larger, more faithful) |
//!
//! Payload size grows monotonically with both values. The step sizes only
//! describe the suggested increments; any value inside the range is accepted.

use std::fmt;

use crate::error::{AssistantError, AssistantResult};

/// Immutable preprocessing settings for one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    /// Longest allowed image side in pixels. Smaller images are never upscaled.
    pub max_edge: u32,
    /// JPEG quality used when recompressing the processed image.
    pub quality: u8,
}

impl ImageSettings {
    pub const MIN_EDGE: u32 = 400;
    pub const MAX_EDGE: u32 = 1200;
    pub const EDGE_STEP: u32 = 100;
    pub const DEFAULT_EDGE: u32 = 800;

    pub const MIN_QUALITY: u8 = 50;
    pub const MAX_QUALITY: u8 = 100;
    pub const QUALITY_STEP: u8 = 5;
    pub const DEFAULT_QUALITY: u8 = 85;

    /// Creates a settings record without validating it.
    pub fn new(max_edge: u32, quality: u8) -> Self {
        Self { max_edge, quality }
    }

    /// Validates both settings against their allowed ranges.
    pub fn validate(&self) -> AssistantResult<()> {
        if !(Self::MIN_EDGE..=Self::MAX_EDGE).contains(&self.max_edge) {
            return Err(AssistantError::validation(
                "max_edge",
                format!("must be between {} and {}", Self::MIN_EDGE, Self::MAX_EDGE),
                self.max_edge.to_string(),
            ));
        }
        if !(Self::MIN_QUALITY..=Self::MAX_QUALITY).contains(&self.quality) {
            return Err(AssistantError::validation(
                "quality",
                format!(
                    "must be between {} and {}",
                    Self::MIN_QUALITY,
                    Self::MAX_QUALITY
                ),
                self.quality.to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_edge: Self::DEFAULT_EDGE,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

/// Category the user says the project belongs to.
///
/// Purely cosmetic: it is echoed back in the output header and never sent to
/// the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProjectType {
    #[default]
    Furniture,
    HomeDecor,
    StorageSolutions,
    Crafts,
    Other,
}

impl ProjectType {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Furniture => "Furniture",
            ProjectType::HomeDecor => "Home Decor",
            ProjectType::StorageSolutions => "Storage Solutions",
            ProjectType::Crafts => "Crafts",
            ProjectType::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ImageSettings::default();
        assert_eq!(settings.max_edge, 800);
        assert_eq!(settings.quality, 85);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = ImageSettings::default();

        // Range bounds are inclusive
        settings.max_edge = 400;
        assert!(settings.validate().is_ok());
        settings.max_edge = 1200;
        assert!(settings.validate().is_ok());

        settings.max_edge = 399;
        assert!(settings.validate().is_err());
        settings.max_edge = 1201;
        assert!(settings.validate().is_err());
        settings.max_edge = 800; // Reset

        settings.quality = 49;
        assert!(settings.validate().is_err());
        settings.quality = 101;
        assert!(settings.validate().is_err());
        settings.quality = 100;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_project_type_labels() {
        assert_eq!(ProjectType::HomeDecor.to_string(), "Home Decor");
        assert_eq!(ProjectType::StorageSolutions.label(), "Storage Solutions");
        assert_eq!(ProjectType::default(), ProjectType::Furniture);
    }
}

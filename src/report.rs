//! # Instructions Report
//!
//! Presentation of a finished analysis: the terminal rendering and the
//! plain-text export. The model's answer is never parsed or reshaped; both
//! outputs carry it verbatim.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::ProjectType;
use crate::error::{AssistantError, AssistantResult};
use crate::processing::Size;

/// Default name of the exported instructions file.
pub const INSTRUCTIONS_FILE_NAME: &str = "diy_instructions.txt";

/// MIME type of the exported instructions file.
pub const INSTRUCTIONS_MIME: &str = "text/plain";

pub const DISCLAIMER: &str = "⚠️ Note: These instructions are AI-generated suggestions. Always prioritize safety and consult with experienced DIY enthusiasts or professionals when needed.";

pub const API_KEY_INSTRUCTIONS: &str = "\
1. Go to Groq's website (https://groq.com) and sign up for an account
2. Generate an API key from your dashboard
3. Pass it with --api-key or export GROQ_API_KEY";

pub const TIPS: &str = "\
Photography Tips:
- Take photos in good lighting
- Capture multiple angles if possible
- Ensure the entire item is visible
- Include size reference when possible
- Use a clean, uncluttered background

Project Documentation:
- Note down any specific materials or finishes you prefer
- Consider your skill level when choosing projects
- Have basic tools ready before starting
- Always prioritize safety equipment

Image Settings:
- Adjust --max-size to balance quality and processing speed
- Higher --quality means better detail but larger file size
- For most project photos, the default settings work well";

/// A successful analysis, ready to show and export.
#[derive(Debug, Clone)]
pub struct InstructionsReport {
    pub project_type: ProjectType,
    pub original: Size,
    pub processed: Size,
    pub payload_bytes: usize,
    pub instructions: String,
}

impl InstructionsReport {
    /// Terminal rendering: header, the verbatim instructions, then the disclaimer.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "📋 Project Instructions ({})", self.project_type);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.instructions);
        let _ = writeln!(out);
        let _ = write!(out, "{}", DISCLAIMER);
        out
    }

    /// Export the instructions, verbatim, to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> AssistantResult<PathBuf> {
        save_instructions(&self.instructions, path)
    }
}

/// Write `text` unchanged to `path`, creating missing parent directories.
pub fn save_instructions(text: &str, path: impl AsRef<Path>) -> AssistantResult<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AssistantError::io_at("create output directory", parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| AssistantError::io_at("write instructions", path, e))?;
    info!("wrote {} bytes of {} to {}", text.len(), INSTRUCTIONS_MIME, path.display());
    Ok(path.to_path_buf())
}

//! # Assistant Session
//!
//! Straight-line orchestration of one interaction:
//!
//! 1. decode the uploaded photo
//! 2. resize and recompress it with the session's [`ImageSettings`]
//! 3. send one instruction request through the configured client
//! 4. hand back everything the presentation layer needs
//!
//! A session holds no state between interactions besides the reusable
//! resizer. Image errors propagate to the caller; request failures come back
//! inside the [`AnalysisOutcome`].

use std::path::Path;

use image::DynamicImage;
use log::info;

use crate::config::{ImageSettings, ProjectType};
use crate::error::{AssistantError, AssistantResult};
use crate::processing::{ImagePreprocessor, PreparedImage, load_image};
use crate::report::InstructionsReport;
use crate::vision::{AnalysisOutcome, InferenceClient, InstructionRequester, RequestSettings};

/// Everything one interaction produced.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub project_type: ProjectType,
    pub prepared: PreparedImage,
    pub outcome: AnalysisOutcome,
}

impl SessionOutcome {
    /// The report to show and export, when the request succeeded.
    pub fn report(&self) -> Option<InstructionsReport> {
        self.outcome.instructions().map(|text| InstructionsReport {
            project_type: self.project_type,
            original: self.prepared.processed.original,
            processed: self.prepared.processed.processed,
            payload_bytes: self.prepared.payload.byte_len(),
            instructions: text.to_string(),
        })
    }
}

/// One-user, one-request orchestration over an [`InferenceClient`].
pub struct AssistantSession<C> {
    preprocessor: ImagePreprocessor,
    requester: InstructionRequester<C>,
    project_type: ProjectType,
}

impl<C: InferenceClient> AssistantSession<C> {
    /// Create a new session using the builder pattern.
    pub fn builder() -> AssistantSessionBuilder<C> {
        AssistantSessionBuilder::new()
    }

    pub fn image_settings(&self) -> ImageSettings {
        self.preprocessor.settings()
    }

    /// Preprocess only. Used for previews and dry runs.
    pub fn prepare(&mut self, image: DynamicImage) -> AssistantResult<PreparedImage> {
        self.preprocessor.prepare(image)
    }

    /// Preprocess `image` and request instructions for it.
    pub fn analyze(&mut self, image: DynamicImage) -> AssistantResult<SessionOutcome> {
        let prepared = self.prepare(image)?;
        info!(
            "analyzing {} project image ({}x{} -> {}x{})",
            self.project_type,
            prepared.processed.original.w,
            prepared.processed.original.h,
            prepared.processed.processed.w,
            prepared.processed.processed.h
        );
        let outcome = self.requester.request(&prepared.payload);
        Ok(SessionOutcome {
            project_type: self.project_type,
            prepared,
            outcome,
        })
    }

    /// [`Self::analyze`] for an image file on disk.
    pub fn analyze_file(&mut self, path: impl AsRef<Path>) -> AssistantResult<SessionOutcome> {
        let image = load_image(path)?;
        self.analyze(image)
    }
}

/// Builder for creating sessions with fluent API.
pub struct AssistantSessionBuilder<C> {
    image: ImageSettings,
    request: RequestSettings,
    project_type: ProjectType,
    client: Option<C>,
}

impl<C: InferenceClient> AssistantSessionBuilder<C> {
    /// Create a new session builder with default settings.
    pub fn new() -> Self {
        Self {
            image: ImageSettings::default(),
            request: RequestSettings::default(),
            project_type: ProjectType::default(),
            client: None,
        }
    }

    pub fn image_settings(mut self, settings: ImageSettings) -> Self {
        self.image = settings;
        self
    }

    pub fn request_settings(mut self, settings: RequestSettings) -> Self {
        self.request = settings;
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn client(mut self, client: C) -> Self {
        self.client = Some(client);
        self
    }

    /// Validate settings and build the session.
    pub fn build(self) -> AssistantResult<AssistantSession<C>> {
        self.image.validate()?;
        let client = self
            .client
            .ok_or_else(|| AssistantError::config("client", "none", "an inference client is required"))?;
        Ok(AssistantSession {
            preprocessor: ImagePreprocessor::new(self.image),
            requester: InstructionRequester::with_settings(client, self.request),
            project_type: self.project_type,
        })
    }
}

impl<C: InferenceClient> Default for AssistantSessionBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

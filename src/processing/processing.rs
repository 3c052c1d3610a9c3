//! # Image Preprocessing Pipeline
//!
//! Turns an uploaded photo into the payload embedded in the inference request.
//!
//! ## Pipeline
//!
//! 1. **Load**: decode JPEG/PNG bytes into a [`DynamicImage`]
//! 2. **Resize**: clamp the longest edge to `max_edge` (Lanczos3, never upscales)
//! 3. **Compress**: convert to RGB8 and encode as JPEG at `quality`
//! 4. **Encode**: base-64 the JPEG bytes into an [`EncodedPayload`]
//!
//! Every step is a pure function of its input and an [`ImageSettings`] record;
//! nothing is cached between calls. [`ImagePreprocessor`] only exists to reuse
//! one `fast_image_resize::Resizer` across calls.
//!
//! Decode and encode failures are returned as [`AssistantError`] and are not
//! converted to strings here.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use diy_scale::cpu::{ScaleError, rgb_len, scale_rgb_cpu};
use diy_scale::presets::{Size, build_plan};
use fast_image_resize::Resizer;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use log::debug;

use crate::config::ImageSettings;
use crate::error::{AssistantError, AssistantResult};

/// MIME type of the recompressed payload.
pub const PAYLOAD_MIME: &str = "image/jpeg";

/// A resized image together with the sizes shown to the user.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub image: DynamicImage,
    pub original: Size,
    pub processed: Size,
}

impl ProcessedImage {
    /// True when the image was already small enough and left untouched.
    pub fn is_unchanged(&self) -> bool {
        self.original == self.processed
    }
}

/// Base-64 text of a compressed image, ready to embed as a data URI.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    base64: String,
    byte_len: usize,
}

impl EncodedPayload {
    /// Encode raw bytes with the standard base-64 alphabet.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            base64: general_purpose::STANDARD.encode(bytes),
            byte_len: bytes.len(),
        }
    }

    /// The base-64 text.
    pub fn as_str(&self) -> &str {
        &self.base64
    }

    /// Size of the compressed bytes before encoding.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Size of the base-64 text.
    pub fn encoded_len(&self) -> usize {
        self.base64.len()
    }

    /// `data:image/jpeg;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", PAYLOAD_MIME, self.base64)
    }

    /// Recover the compressed bytes.
    pub fn decode(&self) -> AssistantResult<Vec<u8>> {
        Ok(general_purpose::STANDARD.decode(&self.base64)?)
    }

    /// Recover the image the payload was built from (lossy-equal).
    pub fn decode_image(&self) -> AssistantResult<DynamicImage> {
        let bytes = self.decode()?;
        image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).map_err(AssistantError::decode)
    }
}

impl std::fmt::Debug for EncodedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedPayload")
            .field("byte_len", &self.byte_len)
            .field("encoded_len", &self.base64.len())
            .finish()
    }
}

/// Everything produced by one preprocessing pass.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub processed: ProcessedImage,
    pub payload: EncodedPayload,
}

/// Read and decode an image file. The format is guessed from the content.
pub fn load_image(path: impl AsRef<Path>) -> AssistantResult<DynamicImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| AssistantError::io_at("read image", path, e))?;
    load_image_from_memory(&bytes)
}

/// Decode an image held in memory.
pub fn load_image_from_memory(bytes: &[u8]) -> AssistantResult<DynamicImage> {
    let image = image::load_from_memory(bytes).map_err(AssistantError::decode)?;
    debug!(
        "decoded {}x{} image ({:?}, {} bytes)",
        image.width(),
        image.height(),
        image.color(),
        bytes.len()
    );
    Ok(image)
}

/// Clamp the longest edge of `image` to `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged (same dimensions, same color
/// mode). Downscaled images come back as RGB8.
pub fn resize_image(image: DynamicImage, max_edge: u32) -> AssistantResult<DynamicImage> {
    resize_with(&mut Resizer::new(), image, max_edge)
}

fn resize_with(
    resizer: &mut Resizer,
    image: DynamicImage,
    max_edge: u32,
) -> AssistantResult<DynamicImage> {
    let (w, h) = image.dimensions();
    let input = Size { w, h };
    let plan = build_plan(input, max_edge);
    if plan.is_identity() {
        return Ok(image);
    }

    let rgb = image.into_rgb8();
    let mut out = vec![0u8; rgb_len(plan.out)];
    scale_rgb_cpu(resizer, rgb.as_raw(), input, &plan, &mut out)?;

    let resized = rgb_image_from_raw(plan.out, out)?;
    debug!("resized {}x{} -> {}x{}", w, h, plan.out.w, plan.out.h);
    Ok(DynamicImage::ImageRgb8(resized))
}

/// Wrap a tightly packed RGB8 buffer of `size` as an image.
fn rgb_image_from_raw(size: Size, buf: Vec<u8>) -> Result<RgbImage, ScaleError> {
    let len = buf.len();
    RgbImage::from_raw(size.w, size.h, buf).ok_or(ScaleError::OutputShape {
        w: size.w,
        h: size.h,
        len,
    })
}

/// Encode `image` as JPEG at `quality` (1-100), converting to RGB8 first.
pub fn compress_image(image: &DynamicImage, quality: u8) -> AssistantResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(AssistantError::validation(
            "quality",
            "must be between 1 and 100",
            quality.to_string(),
        ));
    }

    let converted;
    let rgb: &RgbImage = match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => {
            converted = other.to_rgb8();
            &converted
        }
    };

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(rgb)
        .map_err(|e| AssistantError::encode("jpeg compression", e))?;
    debug!("compressed at quality {} -> {} bytes", quality, bytes.len());
    Ok(bytes)
}

/// Base-64 encode compressed image bytes.
pub fn encode_payload(bytes: &[u8]) -> EncodedPayload {
    EncodedPayload::from_bytes(bytes)
}

/// Write the processed image to `path`. The format follows the file extension.
pub fn save_processed(image: &DynamicImage, path: impl AsRef<Path>) -> AssistantResult<()> {
    let path = path.as_ref();
    // JPEG cannot carry alpha; the uploaded image is RGB anyway
    DynamicImage::ImageRgb8(image.to_rgb8())
        .save(path)
        .map_err(|e| AssistantError::encode(format!("saving {}", path.display()), e))
}

/// Stateful preprocessor that reuses one resizer across images.
pub struct ImagePreprocessor {
    resizer: Resizer,
    settings: ImageSettings,
}

impl ImagePreprocessor {
    /// Create a preprocessor for the given settings.
    pub fn new(settings: ImageSettings) -> Self {
        Self {
            resizer: Resizer::new(),
            settings,
        }
    }

    pub fn settings(&self) -> ImageSettings {
        self.settings
    }

    /// Resize step only, keeping the size bookkeeping.
    pub fn resize(&mut self, image: DynamicImage) -> AssistantResult<ProcessedImage> {
        let (w, h) = image.dimensions();
        let image = resize_with(&mut self.resizer, image, self.settings.max_edge)?;
        let processed = Size {
            w: image.width(),
            h: image.height(),
        };
        Ok(ProcessedImage {
            image,
            original: Size { w, h },
            processed,
        })
    }

    /// Compress and encode an already resized image.
    pub fn encode(&self, processed: &ProcessedImage) -> AssistantResult<EncodedPayload> {
        let bytes = compress_image(&processed.image, self.settings.quality)?;
        Ok(encode_payload(&bytes))
    }

    /// Full pass: resize, compress, encode.
    pub fn prepare(&mut self, image: DynamicImage) -> AssistantResult<PreparedImage> {
        let processed = self.resize(image)?;
        let payload = self.encode(&processed)?;
        Ok(PreparedImage { processed, payload })
    }
}

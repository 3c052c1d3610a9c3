//! # Processing Module
//!
//! Image preprocessing for the vision-model upload: resize, recompress, encode.

pub mod processing;

// Re-export commonly used types for convenience
pub use processing::{
    EncodedPayload, ImagePreprocessor, PreparedImage, ProcessedImage, compress_image,
    encode_payload, load_image, load_image_from_memory, resize_image, save_processed,
};
pub use diy_scale::presets::Size;

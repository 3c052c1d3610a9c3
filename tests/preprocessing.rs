//! Integration tests for the image preprocessing pipeline
//!
//! These tests pin down the behaviour the upload depends on:
//!
//! 1. Images that already fit are never resampled or upscaled
//! 2. Larger images are clamped so the longest edge equals the limit
//! 3. Compression always yields a decodable, non-empty JPEG
//! 4. Base-64 payloads decode back to the same picture (lossy-equal)
//! 5. Raising the quality never shrinks the payload

mod common;

use common::test_images::{gradient, mean_abs_diff, png_bytes, rgba, textured};
use diy_assistant::config::ImageSettings;
use diy_assistant::processing::{
    ImagePreprocessor, Size, compress_image, encode_payload, load_image, load_image_from_memory,
    resize_image, save_processed,
};
use image::{GenericImageView, ImageFormat};

#[test]
fn test_images_within_limit_are_unchanged() {
    for (w, h, max_edge) in [(800, 600, 800), (400, 1200, 1200), (1, 1, 400), (799, 800, 800)] {
        let out = resize_image(gradient(w, h), max_edge).unwrap();
        assert_eq!(out.dimensions(), (w, h), "{}x{} at {} was resized", w, h, max_edge);
    }
}

#[test]
fn test_larger_images_clamp_longest_edge() {
    for (w, h, max_edge) in [(2000, 1000, 800), (1000, 3000, 600), (1201, 1201, 1200), (4032, 3024, 1000)] {
        let out = resize_image(gradient(w, h), max_edge).unwrap();
        let (ow, oh) = out.dimensions();
        assert_eq!(ow.max(oh), max_edge);

        let before = w as f64 / h as f64;
        let after = ow as f64 / oh as f64;
        let short = ow.min(oh) as f64;
        // at most half a pixel of rounding on the short side
        assert!(
            (before - after).abs() / before <= 0.5 / (short - 0.5),
            "{}x{} -> {}x{} drifted",
            w, h, ow, oh
        );
    }
}

#[test]
fn test_compress_yields_decodable_jpeg() {
    for image in [gradient(64, 48), textured(33, 17), rgba(20, 20)] {
        let bytes = compress_image(&image, 85).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), image.dimensions());
    }
}

#[test]
fn test_payload_round_trip_is_lossy_equal() {
    let original = gradient(320, 240);
    let payload = encode_payload(&compress_image(&original, 90).unwrap());

    assert!(payload.data_uri().starts_with("data:image/jpeg;base64,"));
    let decoded = payload.decode_image().unwrap();
    assert_eq!(decoded.dimensions(), (320, 240));
    assert!(mean_abs_diff(&original, &decoded) < 6.0);
}

#[test]
fn test_quality_is_monotonic_in_size() {
    let image = textured(256, 192);
    let mut previous = 0usize;
    for quality in (ImageSettings::MIN_QUALITY..=ImageSettings::MAX_QUALITY).step_by(5) {
        let len = compress_image(&image, quality).unwrap().len();
        assert!(len >= previous, "quality {} produced {} bytes < {}", quality, len, previous);
        previous = len;
    }
}

#[test]
fn test_end_to_end_2000x1000_at_800() {
    let mut preprocessor = ImagePreprocessor::new(ImageSettings::new(800, 85));
    let prepared = preprocessor.prepare(gradient(2000, 1000)).unwrap();

    assert_eq!(prepared.processed.original, Size { w: 2000, h: 1000 });
    assert_eq!(prepared.processed.processed, Size { w: 800, h: 400 });

    let bytes = prepared.payload.decode().unwrap();
    assert_eq!(bytes.len(), prepared.payload.byte_len());

    let decoded = prepared.payload.decode_image().unwrap();
    assert_eq!(decoded.dimensions(), (800, 400));
    assert!(mean_abs_diff(&prepared.processed.image, &decoded) < 6.0);
}

#[test]
fn test_png_upload_with_alpha() {
    let bytes = png_bytes(&rgba(1600, 900));
    let image = load_image_from_memory(&bytes).unwrap();

    let mut preprocessor = ImagePreprocessor::new(ImageSettings::new(400, 60));
    let prepared = preprocessor.prepare(image).unwrap();
    assert_eq!(prepared.processed.processed, Size { w: 400, h: 225 });
    assert!(prepared.payload.byte_len() > 0);
}

#[test]
fn test_load_and_save_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let upload = dir.path().join("upload.png");
    std::fs::write(&upload, png_bytes(&gradient(900, 600))).unwrap();

    let image = load_image(&upload).unwrap();
    let resized = resize_image(image, 450).unwrap();
    let preview = dir.path().join("processed.jpg");
    save_processed(&resized, &preview).unwrap();

    assert_eq!(load_image(&preview).unwrap().dimensions(), (450, 300));
}

#[test]
fn test_unreadable_inputs_propagate_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = load_image(dir.path().join("nope.jpg")).unwrap_err();
    assert_eq!(missing.category(), "io");

    let corrupt = dir.path().join("corrupt.png");
    let mut bytes = png_bytes(&gradient(10, 10));
    bytes.truncate(20);
    std::fs::write(&corrupt, bytes).unwrap();
    assert_eq!(load_image(&corrupt).unwrap_err().category(), "decode");
}

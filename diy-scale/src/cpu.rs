// SPDX-License-Identifier: MIT
// CPU scaler built on fast_image_resize (SIMD-accelerated).
// RGB8 in → RGB8 out, direct write into caller-provided dst buffer.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x3;
use fir::{FilterType, ResizeAlg, ResizeOptions, Resizer};

use crate::presets::{ScalePlan, Size};

#[derive(Debug)]
pub enum ScaleError {
    BufferTooSmall { needed: usize, actual: usize },
    SourceSizeMismatch { expected: usize, actual: usize },
    OutputShape { w: u32, h: u32, len: usize },
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::BufferTooSmall { needed, actual } => {
                write!(f, "Output buffer too small: need {} bytes, got {}", needed, actual)
            }
            ScaleError::SourceSizeMismatch { expected, actual } => {
                write!(f, "Source buffer holds {} bytes, expected {}", actual, expected)
            }
            ScaleError::OutputShape { w, h, len } => {
                write!(f, "Scaled buffer of {} bytes does not form a {}x{} RGB image", len, w, h)
            }
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

/// Bytes needed for a tightly packed RGB8 image of `size`.
pub fn rgb_len(size: Size) -> usize {
    (size.w as usize) * (size.h as usize) * 3
}

/// Resample a tightly packed RGB8 image according to `plan`.
/// `dst` must hold at least `plan.out.w * plan.out.h * 3` bytes.
/// Uses a Lanczos3 convolution, the highest-quality filter fast_image_resize offers.
pub fn scale_rgb_cpu(
    resizer: &mut Resizer,
    src_rgb: &[u8],
    src: Size,
    plan: &ScalePlan,
    dst: &mut [u8],
) -> Result<(), ScaleError> {
    let src_len = rgb_len(src);
    if src_rgb.len() != src_len {
        return Err(ScaleError::SourceSizeMismatch { expected: src_len, actual: src_rgb.len() });
    }
    let dst_len = rgb_len(plan.out);
    if dst.len() < dst_len {
        return Err(ScaleError::BufferTooSmall { needed: dst_len, actual: dst.len() });
    }

    if plan.is_identity() {
        dst[..dst_len].copy_from_slice(src_rgb);
        return Ok(());
    }

    let src_view = TypedImageRef::<U8x3>::from_buffer(src.w, src.h, src_rgb)?;
    let mut dst_image = TypedImage::<U8x3>::from_buffer(plan.out.w, plan.out.h, &mut dst[..dst_len])?;

    let opts = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer.resize_typed::<U8x3>(&src_view, &mut dst_image, &opts)?;

    Ok(())
}

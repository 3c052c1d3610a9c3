// SPDX-License-Identifier: MIT
//! # Scaling Plan Computation
//!
//! A [`ScalePlan`] records the input size, the longest-edge limit it was built
//! for, and the output size the resampler must produce.
//!
//! - Aspect ratio is always preserved
//! - No upscaling: images whose longest side fits the limit are left unchanged
//! - Output sides are rounded to the nearest pixel and clamped to at least 1px

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    /// Length of the longest side.
    pub fn long_side(&self) -> u32 {
        self.w.max(self.h)
    }
}

/// Complete scaling plan computed from an input size and a longest-edge limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalePlan {
    /// Original input dimensions
    pub input: Size,
    /// Longest-edge limit the plan was built for
    pub max_long_side: u32,
    /// Final computed output dimensions
    pub out: Size,
}

impl ScalePlan {
    /// True when the output equals the input and no resampling is needed.
    pub fn is_identity(&self) -> bool {
        self.input == self.out
    }

    /// Uniform factor applied to both sides (1.0 for identity plans).
    pub fn scale_factor(&self) -> f64 {
        let long = self.input.long_side().max(1) as f64;
        (self.max_long_side as f64 / long).min(1.0)
    }
}

/// Compute a scaling plan that clamps the longest side to `max_long_side`.
///
/// # Arguments
/// * `input` - Source image dimensions
/// * `max_long_side` - Largest allowed value for the longest output side
///
/// # Performance
/// O(1) computation with minimal floating-point operations
pub fn build_plan(input: Size, max_long_side: u32) -> ScalePlan {
    let (w, h) = fit_preserve(input, max_long_side);
    ScalePlan {
        input,
        max_long_side,
        out: Size { w, h },
    }
}

/// Fit image within max_long constraint while preserving aspect ratio.
/// Returns the original dimensions if the longest side already fits.
fn fit_preserve(input: Size, max_long: u32) -> (u32, u32) {
    if input.long_side() <= max_long {
        return (input.w, input.h);
    }
    let (w, h) = (input.w as f64, input.h as f64);
    let s = max_long as f64 / w.max(h);
    (
        ((w * s).round() as u32).clamp(1, max_long.max(1)),
        ((h * s).round() as u32).clamp(1, max_long.max(1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_clamped_to_long_side() {
        let plan = build_plan(Size { w: 2000, h: 1000 }, 800);
        assert_eq!(plan.out, Size { w: 800, h: 400 });
        assert!((plan.scale_factor() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_portrait_clamped_to_long_side() {
        let plan = build_plan(Size { w: 900, h: 1600 }, 400);
        assert_eq!(plan.out, Size { w: 225, h: 400 });
    }

    #[test]
    fn test_small_input_is_identity() {
        for input in [
            Size { w: 640, h: 480 },
            Size { w: 800, h: 800 },
            Size { w: 1, h: 1 },
        ] {
            let plan = build_plan(input, 800);
            assert!(plan.is_identity(), "{:?} should not be resampled", input);
            assert_eq!(plan.scale_factor(), 1.0);
        }
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        let plan = build_plan(Size { w: 10_000, h: 3 }, 400);
        assert_eq!(plan.out, Size { w: 400, h: 1 });
    }

    #[test]
    fn test_aspect_ratio_within_rounding() {
        let input = Size { w: 1337, h: 911 };
        let plan = build_plan(input, 500);
        assert_eq!(plan.out.long_side(), 500);
        let before = input.w as f64 / input.h as f64;
        let after = plan.out.w as f64 / plan.out.h as f64;
        // one pixel of rounding on the short side bounds the drift
        let tolerance = before / plan.out.h as f64;
        assert!((before - after).abs() <= tolerance);
    }
}

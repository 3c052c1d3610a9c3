// SPDX-License-Identifier: MIT
//! # diy-scale: Longest-Edge Downscaling for Vision-Model Payloads
//!
//! Photos sent to a hosted vision model are billed and rate-limited by payload
//! size, so every upload is clamped to a maximum longest edge before it is
//! recompressed. This crate holds the two halves of that step:
//!
//! - [`presets`]: pure plan computation (output size for a given input and limit)
//! - [`cpu`]: the actual pixel resampling, built on `fast_image_resize`
//!
//! Plans never upscale. An input whose longest side already fits is reported as
//! an identity plan and callers can skip resampling entirely.
//!
//! ## Usage Example
//!
//! ```rust
//! use diy_scale::presets::{build_plan, Size};
//!
//! let plan = build_plan(Size { w: 2000, h: 1000 }, 800);
//! assert_eq!((plan.out.w, plan.out.h), (800, 400));
//! assert!(!plan.is_identity());
//! ```

pub mod cpu;
pub mod presets;

//! Deterministic grayscale images from linear congruential generators.
//!
//! The generator starts at `x = 1` and runs `x ← (a * x + c) mod m` once per
//! pixel in row-major order. Each state is normalized to an intensity
//! `floor(x / m * 255)` and the resulting buffer is encoded as png.
//!
//! ```
//! let params = lcgen::Params {
//!     a: 1,
//!     c: 1,
//!     m: 256,
//!     size: 2,
//! };
//!
//! assert_eq!(lcgen::generate(&params)?, [1, 2, 3, 4]);
//! let png = lcgen::render(&params)?;
//! assert!(!png.is_empty());
//! # Ok::<(), lcgen::Error>(())
//! ```

mod analysis;
mod error;
mod raster;
mod sequence;

/// The maximum side length of a generated image.
pub const MAX_SIZE: u32 = 1024;

/// The side length used when none is requested.
pub const DEFAULT_SIZE: u32 = 256;

pub use crate::{
    analysis::{Analysis, Conditions, analyze},
    error::{Error, ErrorKind},
    raster::{encode, render},
    sequence::{Intensities, Lcg, Params, generate, intensities},
};

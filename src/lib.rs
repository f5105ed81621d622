//! Perceptual logo sizing and visual-center alignment.
//!
//! Logos of wildly different shapes look mismatched when laid out at a fixed
//! height. This crate measures each logo's visual features from its pixels and
//! turns them into a normalized render size plus an optional translation that
//! centers the logo on its visual mass.
//!
//! The core pipeline is pure math over a borrowed RGBA8 buffer: no I/O, no
//! allocations, `no_std` compatible.
//!
//! # Modules
//!
//! - [`pixels`]: `Size` and the borrowed `PixelBuffer` view
//! - [`background`]: border-histogram background detection
//! - [`analyze`]: contrast scan producing content box, density and centroid
//! - [`measure`]: `Features` record and the measurement entry points
//! - [`dimension`]: aspect-ratio and density size normalization
//! - [`align`]: visual-center translation
//! - [`css`]: inline style rendering
//! - [`options`]: `StyleOptions` and its query-string parser
//! - `svg` (feature `svg`): intrinsic dimensions of SVG documents
//! - `loader`, `style` (feature `image`): decoding, SVG rendering, resampling and orchestration
//!
//! # Example
//!
//! ```
//! use zenlogo::{measure, PixelBuffer, Size, StyleOptions};
//!
//! // 4×4 white image with a black 2×2 block in the top-left corner.
//! let mut bytes = [255u8; 4 * 4 * 4];
//! for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
//!     let i = (y * 4 + x) * 4;
//!     bytes[i..i + 3].copy_from_slice(&[0, 0, 0]);
//! }
//! let buffer = PixelBuffer::unscaled(&bytes, Size::new(4, 4)).unwrap();
//! let features = measure(&buffer, 10);
//! assert_eq!(features.content_box_width, 2.0);
//!
//! let style = StyleOptions::new(48.0).style_for(4.0, 4.0, Some(&features));
//! // A fully dense logo is shrunk: (0.35 / 1.0)^0.25 × 48 ≈ 36.9
//! assert_eq!(style.size, Size::new(37, 37));
//! assert!(style.transform.is_none());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod align;
pub mod analyze;
pub mod background;
pub mod css;
pub mod dimension;
pub mod measure;
pub mod options;
pub mod pixels;

mod math;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "image")]
pub mod loader;
#[cfg(feature = "image")]
pub mod style;

pub use align::{AlignBy, ParseAlignError, TransformOffset, visual_center_offset};
pub use analyze::analyze;
pub use background::{Background, detect_background};
pub use css::LogoStyle;
pub use dimension::{SizeNormalizer, normalize_size};
pub use measure::{Features, measure, measure_rendered};
pub use options::StyleOptions;
pub use pixels::{PixelBuffer, PixelBufferError, Size};

#[cfg(feature = "svg")]
pub use svg::{SvgError, parse_dimensions, parse_dimensions_lenient};

#[cfg(feature = "image")]
pub use loader::{LoadError, SampledImage};
#[cfg(feature = "image")]
pub use style::{LogoSource, StyleError, style, try_style};

//! Perceptual size normalization.
//!
//! Logos with very different aspect ratios look equally "big" when their
//! areas are closer than their widths or heights. Raising the aspect ratio to
//! a `scale_factor` between 0 and 1 interpolates between "same height"
//! (`0.0`) and "same width" (`1.0`); `0.5` keeps the area constant.
//! Sparse, thin logos can additionally be grown and dense, heavy ones shrunk
//! by comparing their measured pixel density to [`REFERENCE_DENSITY`].
//!
//! # Example
//!
//! ```
//! use zenlogo::dimension::SizeNormalizer;
//! use zenlogo::pixels::Size;
//!
//! let size = SizeNormalizer::new(48.0).scale_factor(0.5).compute(200.0, 100.0, None);
//! assert_eq!(size, Size::new(68, 34));
//! ```

use crate::math;
use crate::pixels::Size;

/// Pixel density at which no density adjustment is applied.
pub const REFERENCE_DENSITY: f64 = 0.35;
/// Lower clamp for the density scale.
pub const MIN_DENSITY_SCALE: f64 = 0.5;
/// Upper clamp for the density scale.
pub const MAX_DENSITY_SCALE: f64 = 2.0;
/// Default aspect-ratio exponent.
pub const DEFAULT_SCALE_FACTOR: f64 = 0.5;

/// Parameters for mapping intrinsic dimensions to a normalized render size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeNormalizer {
    /// Edge length of a square logo at reference density.
    pub base_size: f64,
    /// Aspect-ratio exponent.
    pub scale_factor: f64,
    /// Strength of the density adjustment. `0.0` disables it.
    pub density_factor: f64,
}

impl SizeNormalizer {
    /// Normalizer with the default scale factor and no density adjustment.
    pub fn new(base_size: f64) -> Self {
        Self {
            base_size,
            scale_factor: DEFAULT_SCALE_FACTOR,
            density_factor: 0.0,
        }
    }

    /// Set the aspect-ratio exponent.
    pub fn scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the density adjustment strength.
    pub fn density_factor(mut self, density_factor: f64) -> Self {
        self.density_factor = density_factor;
        self
    }

    /// Normalized render size for an image of `width`×`height`.
    ///
    /// Non-positive (or NaN) dimensions yield a `base_size` square. Both
    /// output dimensions are at least 1.
    pub fn compute(&self, width: f64, height: f64, pixel_density: Option<f64>) -> Size {
        if !(width > 0.0 && height > 0.0) {
            let side = to_dimension(self.base_size);
            return Size::new(side, side);
        }

        let aspect = width / height;
        let mut normalized_width = math::sane_scale(math::powf(aspect, self.scale_factor)) * self.base_size;
        let mut normalized_height = normalized_width / aspect;

        if let Some(scale) = self.density_scale(pixel_density) {
            normalized_width *= scale;
            normalized_height *= scale;
        }

        Size::new(to_dimension(normalized_width), to_dimension(normalized_height))
    }

    /// Multiplier derived from measured density, clamped to
    /// `[MIN_DENSITY_SCALE, MAX_DENSITY_SCALE]`. `None` means no adjustment.
    fn density_scale(&self, pixel_density: Option<f64>) -> Option<f64> {
        if !(self.density_factor > 0.0) {
            return None;
        }
        let density_ratio = pixel_density? / REFERENCE_DENSITY;
        if !(density_ratio > 0.0) {
            return None;
        }
        let scale = math::sane_scale(math::powf(1.0 / density_ratio, self.density_factor * 0.5));
        Some(scale.clamp(MIN_DENSITY_SCALE, MAX_DENSITY_SCALE))
    }
}

/// Free-function form of [`SizeNormalizer::compute`].
pub fn normalize_size(
    width: f64,
    height: f64,
    base_size: f64,
    scale_factor: f64,
    density_factor: f64,
    pixel_density: Option<f64>,
) -> Size {
    SizeNormalizer::new(base_size)
        .scale_factor(scale_factor)
        .density_factor(density_factor)
        .compute(width, height, pixel_density)
}

/// Round half away from zero; clamp to `1..=u32::MAX` (NaN becomes 1).
fn to_dimension(v: f64) -> u32 {
    (math::round(v) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_two_to_one() {
        // aspect 2 → 2^0.5 × 48 = 67.88 → 68; 67.88 / 2 = 33.94 → 34
        assert_eq!(normalize_size(200.0, 100.0, 48.0, 0.5, 0.0, None), Size::new(68, 34));
    }

    #[test]
    fn portrait_mirrors_landscape() {
        // aspect 0.5 → 0.5^0.5 × 48 = 33.94 → 34; 33.94 / 0.5 = 67.88 → 68
        assert_eq!(normalize_size(100.0, 200.0, 48.0, 0.5, 0.0, None), Size::new(34, 68));
    }

    #[test]
    fn zero_or_negative_dimension_gives_base_square() {
        assert_eq!(normalize_size(0.0, 100.0, 48.0, 0.5, 0.0, None), Size::new(48, 48));
        assert_eq!(normalize_size(100.0, -1.0, 48.0, 0.5, 0.0, None), Size::new(48, 48));
        assert_eq!(normalize_size(f64::NAN, 10.0, 47.5, 0.5, 0.0, None), Size::new(48, 48));
    }

    #[test]
    fn scale_factor_extremes() {
        // 0.0 → same height as base; 1.0 → same width as base.
        assert_eq!(normalize_size(300.0, 100.0, 60.0, 0.0, 0.0, None), Size::new(60, 20));
        assert_eq!(normalize_size(300.0, 100.0, 60.0, 1.0, 0.0, None), Size::new(180, 60));
    }

    #[test]
    fn reference_density_is_neutral() {
        let n = SizeNormalizer::new(48.0).density_factor(0.5);
        assert_eq!(n.compute(100.0, 100.0, Some(REFERENCE_DENSITY)), Size::new(48, 48));
    }

    #[test]
    fn sparse_logo_grows_dense_logo_shrinks() {
        let n = SizeNormalizer::new(48.0).density_factor(1.0);
        // ratio 0.25 → (1 / 0.25)^0.5 = 2.0
        assert_eq!(n.compute(100.0, 100.0, Some(0.0875)), Size::new(96, 96));
        // ratio 2.0 → 0.5^0.5 ≈ 0.707 → 33.94
        assert_eq!(n.compute(100.0, 100.0, Some(0.7)), Size::new(34, 34));
    }

    #[test]
    fn density_scale_is_clamped() {
        let n = SizeNormalizer::new(48.0).density_factor(4.0);
        assert_eq!(n.compute(100.0, 100.0, Some(0.001)), Size::new(96, 96));
        assert_eq!(n.compute(100.0, 100.0, Some(1.0)), Size::new(24, 24));
    }

    #[test]
    fn density_ignored_when_disabled_or_missing() {
        let off = SizeNormalizer::new(48.0);
        assert_eq!(off.compute(100.0, 100.0, Some(0.01)), Size::new(48, 48));
        let on = SizeNormalizer::new(48.0).density_factor(0.5);
        assert_eq!(on.compute(100.0, 100.0, None), Size::new(48, 48));
        assert_eq!(on.compute(100.0, 100.0, Some(0.0)), Size::new(48, 48));
    }

    #[test]
    fn degenerate_scales_become_identity() {
        // NaN exponent would poison the result; treated as no adjustment.
        assert_eq!(normalize_size(200.0, 100.0, 48.0, f64::NAN, 0.0, None), Size::new(48, 24));
        let n = SizeNormalizer::new(48.0).density_factor(f64::INFINITY);
        assert_eq!(n.compute(100.0, 100.0, Some(0.1)), Size::new(48, 48));
    }

    #[test]
    fn tiny_base_never_rounds_to_zero() {
        let n = SizeNormalizer::new(0.6).density_factor(2.0);
        let size = n.compute(1000.0, 10.0, Some(1.0));
        assert!(size.width >= 1 && size.height >= 1, "{size:?}");
    }
}

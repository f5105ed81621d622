//! `f64` math that works with and without `std`.
//!
//! `core` lacks the rounding and transcendental functions on `f64`, so these
//! route through `num_traits::Float`, which uses `libm` under `no_std`.

use num_traits::Float;

#[inline]
pub(crate) fn round(v: f64) -> f64 {
    Float::round(v)
}

#[inline]
pub(crate) fn floor(v: f64) -> f64 {
    Float::floor(v)
}

#[inline]
pub(crate) fn ceil(v: f64) -> f64 {
    Float::ceil(v)
}

#[inline]
pub(crate) fn sqrt(v: f64) -> f64 {
    Float::sqrt(v)
}

#[inline]
pub(crate) fn powf(base: f64, exp: f64) -> f64 {
    Float::powf(base, exp)
}

#[inline]
pub(crate) fn abs(v: f64) -> f64 {
    Float::abs(v)
}

/// Replace a non-finite or non-positive scale with 1.0 (no adjustment).
#[inline]
pub(crate) fn sane_scale(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Round half away from zero to one decimal place, snapping near-zero to 0.
pub(crate) fn round_tenth(v: f64) -> f64 {
    let rounded = round(v * 10.0) / 10.0;
    if abs(rounded) < 1e-9 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_is_half_away_from_zero() {
        assert_eq!(round(2.5), 3.0);
        assert_eq!(round(-2.5), -3.0);
        assert_eq!(round(0.49), 0.0);
    }

    #[test]
    fn sane_scale_rejects_degenerate_values() {
        assert_eq!(sane_scale(f64::NAN), 1.0);
        assert_eq!(sane_scale(f64::INFINITY), 1.0);
        assert_eq!(sane_scale(0.0), 1.0);
        assert_eq!(sane_scale(-3.0), 1.0);
        assert_eq!(sane_scale(1.5), 1.5);
    }

    #[test]
    fn round_tenth_snaps_negative_zero() {
        assert_eq!(round_tenth(-0.04).to_bits(), 0.0f64.to_bits());
        assert_eq!(round_tenth(12.345), 12.3);
        assert_eq!(round_tenth(-3.25), -3.3);
    }
}

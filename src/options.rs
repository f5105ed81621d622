//! Style options and their query-string form.
//!
//! Options can be built in code:
//!
//! ```
//! use zenlogo::align::AlignBy;
//! use zenlogo::options::StyleOptions;
//!
//! let options = StyleOptions::new(48.0)
//!     .density_aware(false)
//!     .align_by(AlignBy::Bounds);
//! assert_eq!(options.contrast_threshold, 10);
//! ```
//!
//! or parsed from `key=value&...` strings, with malformed entries reported as
//! warnings instead of errors (requires `alloc`):
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use zenlogo::options::{self, StyleOptions};
//!
//! let result = options::parse("base-size=64&align_by=visual-center", StyleOptions::new(48.0));
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.options.base_size, 64.0);
//! # }
//! ```

use crate::align::{visual_center_offset, AlignBy};
use crate::css::LogoStyle;
use crate::dimension::{SizeNormalizer, DEFAULT_SCALE_FACTOR};
use crate::measure::{Features, DEFAULT_CONTRAST_THRESHOLD};

/// Default target pixel count for downsampling before analysis.
pub const DEFAULT_PIXEL_BUDGET: u32 = 2_048;
/// Default strength of the density adjustment when density awareness is on.
pub const DEFAULT_DENSITY_FACTOR: f64 = 0.5;

/// Everything that shapes a logo's computed style.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleOptions {
    /// Edge length of a square logo at reference density.
    pub base_size: f64,
    /// Aspect-ratio exponent for size normalization.
    pub scale_factor: f64,
    /// Whether measured pixel density influences size.
    pub density_aware: bool,
    /// Strength of the density adjustment.
    pub density_factor: f64,
    /// Minimum alpha and per-channel color distance for foreground pixels.
    pub contrast_threshold: u8,
    /// Which axes receive a centering translation.
    pub align_by: AlignBy,
    /// Target sample pixel count for raster analysis.
    pub pixel_budget: u32,
}

impl StyleOptions {
    /// Default options for the given base size.
    pub fn new(base_size: f64) -> Self {
        Self {
            base_size,
            scale_factor: DEFAULT_SCALE_FACTOR,
            density_aware: true,
            density_factor: DEFAULT_DENSITY_FACTOR,
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            align_by: AlignBy::default(),
            pixel_budget: DEFAULT_PIXEL_BUDGET,
        }
    }

    /// Set the aspect-ratio exponent: `0.0` gives equal widths, `1.0` equal heights.
    pub fn scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Enable or disable density-based size adjustment.
    pub fn density_aware(mut self, density_aware: bool) -> Self {
        self.density_aware = density_aware;
        self
    }

    /// Set the strength of the density adjustment.
    pub fn density_factor(mut self, density_factor: f64) -> Self {
        self.density_factor = density_factor;
        self
    }

    /// Set the minimum channel difference that counts as foreground.
    pub fn contrast_threshold(mut self, contrast_threshold: u8) -> Self {
        self.contrast_threshold = contrast_threshold;
        self
    }

    /// Set the alignment mode.
    pub fn align_by(mut self, align_by: AlignBy) -> Self {
        self.align_by = align_by;
        self
    }

    /// Set the pixel count rasters are downsampled to before analysis.
    pub fn pixel_budget(mut self, pixel_budget: u32) -> Self {
        self.pixel_budget = pixel_budget;
        self
    }

    /// Whether features must be measured for these options: density
    /// awareness or a visual alignment mode needs them.
    pub fn needs_features(&self) -> bool {
        self.density_aware || self.align_by.is_visual()
    }

    /// Size normalizer for these options. Density adjustment is disabled
    /// unless `density_aware` is set.
    pub fn normalizer(&self) -> SizeNormalizer {
        let density_factor = if self.density_aware {
            self.density_factor
        } else {
            0.0
        };
        SizeNormalizer::new(self.base_size)
            .scale_factor(self.scale_factor)
            .density_factor(density_factor)
    }

    /// Style for a logo of the given intrinsic size and (possibly unmeasured)
    /// features.
    pub fn style_for(
        &self,
        intrinsic_width: f64,
        intrinsic_height: f64,
        features: Option<&Features>,
    ) -> LogoStyle {
        let pixel_density = features
            .filter(|_| self.density_aware)
            .map(|f| f.pixel_density);
        let size = self
            .normalizer()
            .compute(intrinsic_width, intrinsic_height, pixel_density);
        let transform = visual_center_offset(
            features,
            size,
            self.align_by,
            intrinsic_width,
            intrinsic_height,
        );
        LogoStyle { size, transform }
    }

    /// Style used when the logo cannot be inspected at all.
    pub fn fallback_style(&self) -> LogoStyle {
        LogoStyle::fallback(self.base_size)
    }
}

#[cfg(feature = "alloc")]
pub use query::{parse, ParseResult, ParseWarning};

#[cfg(feature = "alloc")]
mod query {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::StyleOptions;
    use crate::align::AlignBy;

    /// Result of parsing an options query string.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ParseResult {
        /// Defaults overridden by every valid key.
        pub options: StyleOptions,
        /// Non-fatal parse warnings.
        pub warnings: Vec<ParseWarning>,
    }

    /// Non-fatal warning from options parsing.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ParseWarning {
        /// A key appeared more than once (last valid value wins).
        DuplicateKey { key: &'static str, value: String },
        /// A key was not recognized.
        KeyNotRecognized { key: String, value: String },
        /// A key was recognized but its value could not be parsed. The
        /// default is kept.
        ValueInvalid {
            key: &'static str,
            value: String,
            reason: &'static str,
        },
    }

    /// Parse `key=value` pairs separated by `&` (or `;`) on top of `defaults`.
    ///
    /// Keys are case-insensitive and `-`/`_` are interchangeable:
    /// `base_size`, `scale_factor`, `density_aware`, `density_factor`,
    /// `contrast_threshold`, `align_by`, `pixel_budget`.
    pub fn parse(query: &str, defaults: StyleOptions) -> ParseResult {
        let mut options = defaults;
        let mut warnings = Vec::new();
        let mut seen: Vec<Key> = Vec::new();

        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split(['&', ';']).filter(|s| !s.trim().is_empty()) {
            let (raw_key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = normalize_key(raw_key);
            let value = value.trim();

            let Some(parsed_key) = Key::from_normalized(&key) else {
                warnings.push(ParseWarning::KeyNotRecognized {
                    key,
                    value: String::from(value),
                });
                continue;
            };

            match apply(&mut options, parsed_key, value) {
                Ok(()) => {
                    if seen.contains(&parsed_key) {
                        warnings.push(ParseWarning::DuplicateKey {
                            key: parsed_key.as_str(),
                            value: String::from(value),
                        });
                    } else {
                        seen.push(parsed_key);
                    }
                }
                Err(reason) => warnings.push(ParseWarning::ValueInvalid {
                    key: parsed_key.as_str(),
                    value: String::from(value),
                    reason,
                }),
            }
        }

        ParseResult { options, warnings }
    }

    fn normalize_key(raw: &str) -> String {
        raw.trim()
            .chars()
            .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
            .collect()
    }

    /// Recognized option keys.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Key {
        BaseSize,
        ScaleFactor,
        DensityAware,
        DensityFactor,
        ContrastThreshold,
        AlignBy,
        PixelBudget,
    }

    impl Key {
        fn from_normalized(key: &str) -> Option<Self> {
            Some(match key {
                "base_size" => Self::BaseSize,
                "scale_factor" => Self::ScaleFactor,
                "density_aware" => Self::DensityAware,
                "density_factor" => Self::DensityFactor,
                "contrast_threshold" => Self::ContrastThreshold,
                "align_by" => Self::AlignBy,
                "pixel_budget" => Self::PixelBudget,
                _ => return None,
            })
        }

        fn as_str(self) -> &'static str {
            match self {
                Self::BaseSize => "base_size",
                Self::ScaleFactor => "scale_factor",
                Self::DensityAware => "density_aware",
                Self::DensityFactor => "density_factor",
                Self::ContrastThreshold => "contrast_threshold",
                Self::AlignBy => "align_by",
                Self::PixelBudget => "pixel_budget",
            }
        }
    }

    fn apply(options: &mut StyleOptions, key: Key, value: &str) -> Result<(), &'static str> {
        match key {
            Key::BaseSize => {
                options.base_size = parse_f64(value)
                    .filter(|&v| v > 0.0)
                    .ok_or("expected a positive number")?;
            }
            Key::ScaleFactor => {
                options.scale_factor = parse_f64(value).ok_or("expected a number")?;
            }
            Key::DensityAware => {
                options.density_aware =
                    parse_bool(value).ok_or("expected true|false|1|0|yes|no|on|off")?;
            }
            Key::DensityFactor => {
                options.density_factor = parse_f64(value)
                    .filter(|&v| v >= 0.0)
                    .ok_or("expected a non-negative number")?;
            }
            Key::ContrastThreshold => {
                options.contrast_threshold = value
                    .parse::<u8>()
                    .map_err(|_| "expected an integer in 0..=255")?;
            }
            Key::AlignBy => {
                options.align_by = AlignBy::parse(value)
                    .ok_or("expected bounds|visual-center|visual-center-x|visual-center-y")?;
            }
            Key::PixelBudget => {
                options.pixel_budget = value
                    .parse::<u32>()
                    .ok()
                    .filter(|&v| v > 0)
                    .ok_or("expected a positive integer")?;
            }
        }
        Ok(())
    }

    fn parse_f64(s: &str) -> Option<f64> {
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn parse_bool(s: &str) -> Option<bool> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

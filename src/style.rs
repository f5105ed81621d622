//! End-to-end styling of a logo source.
//!
//! [`try_style`] surfaces every failure. [`style`] never fails: unparseable
//! `viewBox` components are skipped, an SVG that cannot be rendered is sized
//! without features, and anything else degrades to
//! [`StyleOptions::fallback_style`].
//!
//! ```
//! use zenlogo::align::AlignBy;
//! use zenlogo::options::StyleOptions;
//! use zenlogo::style::{style, LogoSource};
//!
//! let svg = r#"<svg viewBox="0 0 200 100" xmlns="http://www.w3.org/2000/svg"></svg>"#;
//! let options = StyleOptions::new(48.0).align_by(AlignBy::Bounds);
//! let css = style(LogoSource::Svg(svg), &options).to_string();
//! assert_eq!(css, "width: 68px; height: 34px; object-fit: contain; display: block;");
//! ```

use std::path::Path;

use image::ImageFormat;

use crate::css::LogoStyle;
use crate::loader::{self, LoadError, SampledImage};
use crate::measure::{Features, measure, measure_rendered};
use crate::options::StyleOptions;
use crate::svg::{self, SvgError};

/// Where a logo comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogoSource<'a> {
    /// Nothing to inspect; always styled as the fallback square.
    Empty,
    /// SVG markup.
    Svg(&'a str),
    /// A raster file on disk.
    Path(&'a Path),
    /// Encoded bytes with an optional MIME type. Types containing `svg` are
    /// read as UTF-8 SVG markup.
    Bytes {
        bytes: &'a [u8],
        content_type: Option<&'a str>,
    },
}

/// Failure to style a logo.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("invalid SVG: {0}")]
    Svg(#[from] SvgError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("SVG bytes are not valid UTF-8: {0}")]
    Utf8(#[from] core::str::Utf8Error),
}

/// Style for `source`, or the first error encountered.
pub fn try_style(source: LogoSource<'_>, options: &StyleOptions) -> Result<LogoStyle, StyleError> {
    resolve(source, options, true)
}

/// Style for `source`, falling back to a `base_size` square on any error.
pub fn style(source: LogoSource<'_>, options: &StyleOptions) -> LogoStyle {
    resolve(source, options, false).unwrap_or_else(|e| {
        log::warn!("logo could not be analyzed, using fallback style: {e}");
        options.fallback_style()
    })
}

fn resolve(
    source: LogoSource<'_>,
    options: &StyleOptions,
    strict: bool,
) -> Result<LogoStyle, StyleError> {
    match source {
        LogoSource::Empty => Ok(options.fallback_style()),
        LogoSource::Svg(markup) => svg_style(markup, options, strict),
        LogoSource::Path(path) => {
            let sampled = loader::load_path(path, options.pixel_budget)?;
            raster_style(&sampled, options)
        }
        LogoSource::Bytes {
            bytes,
            content_type,
        } => {
            if content_type.is_some_and(|ct| ct.contains("svg")) {
                return svg_style(core::str::from_utf8(bytes)?, options, strict);
            }
            let hint = content_type.and_then(ImageFormat::from_mime_type);
            let sampled = loader::load_bytes(bytes, hint, options.pixel_budget)?;
            raster_style(&sampled, options)
        }
    }
}

/// Vector logos are sized from their declared dimensions. Features are
/// measured from a rendering only for visual alignment modes.
fn svg_style(markup: &str, options: &StyleOptions, strict: bool) -> Result<LogoStyle, StyleError> {
    let dimensions = if strict {
        svg::parse_dimensions(markup)?
    } else {
        svg::parse_dimensions_lenient(markup)
    };
    let (width, height) = dimensions.unwrap_or((0.0, 0.0));
    log::debug!("svg intrinsic size {width}x{height}");

    let features = if options.align_by.is_visual() && width > 0.0 && height > 0.0 {
        match svg_features(markup, width, height, options) {
            Ok(features) => features,
            Err(e) if strict => return Err(e),
            Err(e) => {
                log::debug!("svg could not be measured: {e}");
                None
            }
        }
    } else {
        None
    };
    Ok(options.style_for(width, height, features.as_ref()))
}

/// Features of the rendered SVG, mapped into its intrinsic coordinate space.
fn svg_features(
    markup: &str,
    width: f64,
    height: f64,
    options: &StyleOptions,
) -> Result<Option<Features>, StyleError> {
    let sampled = loader::render_svg(markup, options.pixel_budget)?;
    let buffer = sampled.as_buffer().map_err(LoadError::from)?;
    Ok(measure_rendered(&buffer, options.contrast_threshold, width, height))
}

fn raster_style(sampled: &SampledImage, options: &StyleOptions) -> Result<LogoStyle, StyleError> {
    let buffer = sampled.as_buffer().map_err(LoadError::from)?;
    let features = options
        .needs_features()
        .then(|| measure(&buffer, options.contrast_threshold));
    let original = sampled.original;
    Ok(options.style_for(original.width as f64, original.height as f64, features.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignBy;
    use crate::pixels::Size;

    const FALLBACK_48: &str = "width: 48px; height: 48px; object-fit: contain; display: block;";

    #[test]
    fn empty_source_is_fallback() {
        let style = try_style(LogoSource::Empty, &StyleOptions::new(48.0)).unwrap();
        assert_eq!(style.to_string(), FALLBACK_48);
    }

    const SVG_NS: &str = "http://www.w3.org/2000/svg";

    #[test]
    fn svg_sized_from_view_box_without_transform() {
        let svg = format!(r#"<svg xmlns="{SVG_NS}" viewBox="0 0 200 100"></svg>"#);
        let options = StyleOptions::new(48.0).align_by(AlignBy::Bounds);
        let style = try_style(LogoSource::Svg(&svg), &options).unwrap();
        assert_eq!(style.size, Size::new(68, 34));
        assert!(!style.has_transform());
    }

    #[test]
    fn blank_svg_measures_neutral_features() {
        // Nothing drawn: neutral density 0.5 shrinks by (0.35 / 0.5)^0.25 ≈ 0.915.
        let svg = format!(r#"<svg xmlns="{SVG_NS}" viewBox="0 0 200 100"></svg>"#);
        let options = StyleOptions::new(48.0).align_by(AlignBy::VisualCenter);
        let style = try_style(LogoSource::Svg(&svg), &options).unwrap();
        assert_eq!(style.size, Size::new(62, 31));
        assert!(!style.has_transform());
    }

    #[test]
    fn lenient_svg_skips_bad_view_box_numbers() {
        let svg = r#"<svg viewBox="0 0 x 100" width="200" height="100"></svg>"#;
        let options = StyleOptions::new(48.0).align_by(AlignBy::Bounds);
        assert_eq!(style(LogoSource::Svg(svg), &options).size, Size::new(68, 34));
        assert!(try_style(LogoSource::Svg(svg), &options).is_err());
    }

    #[test]
    fn svg_without_dimensions_is_base_square() {
        let style = try_style(LogoSource::Svg("<svg></svg>"), &StyleOptions::new(40.0)).unwrap();
        assert_eq!(style.size, Size::new(40, 40));
    }

    #[test]
    fn bad_svg_number_raises_or_falls_back() {
        let svg = r#"<svg viewBox="0 0 x 100" xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let options = StyleOptions::new(48.0);
        assert!(matches!(
            try_style(LogoSource::Svg(svg), &options),
            Err(StyleError::Svg(SvgError::InvalidNumber { .. }))
        ));
        assert_eq!(style(LogoSource::Svg(svg), &options).to_string(), FALLBACK_48);
    }

    #[test]
    fn svg_content_type_routes_bytes_to_svg() {
        let source = LogoSource::Bytes {
            bytes: br#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="200"/>"#,
            content_type: Some("image/svg+xml"),
        };
        let options = StyleOptions::new(48.0).align_by(AlignBy::Bounds);
        let style = try_style(source, &options).unwrap();
        assert_eq!(style.size, Size::new(34, 68));
    }

    #[test]
    fn non_utf8_svg_bytes_are_rejected() {
        let source = LogoSource::Bytes {
            bytes: &[0xff, 0xfe, b'<'],
            content_type: Some("image/svg+xml"),
        };
        assert!(matches!(
            try_style(source, &StyleOptions::new(48.0)),
            Err(StyleError::Utf8(_))
        ));
    }

    #[test]
    fn undecodable_bytes_fall_back() {
        let source = LogoSource::Bytes {
            bytes: b"GIF89a but not really",
            content_type: Some("image/gif"),
        };
        let options = StyleOptions::new(48.0);
        assert!(matches!(
            try_style(source, &options),
            Err(StyleError::Load(LoadError::Decode(_)))
        ));
        assert_eq!(style(source, &options).to_string(), FALLBACK_48);
    }
}

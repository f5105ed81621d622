//! Feature measurement: background detection followed by the contrast scan.

use crate::analyze::analyze;
use crate::background::detect_background;
use crate::pixels::{PixelBuffer, Size};

/// Default minimum alpha and per-channel color distance for foreground pixels.
pub const DEFAULT_CONTRAST_THRESHOLD: u8 = 10;
/// Density assumed when an image has no measurable foreground.
pub const NEUTRAL_PIXEL_DENSITY: f64 = 0.5;

/// Visual features of a logo, in original-image pixels.
///
/// Either every field is measured or none is; consumers take
/// `Option<&Features>` where "not measured" is possible. A zero offset is a
/// measurement, not a placeholder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Features {
    /// Coverage of the content box times mean foreground opacity, in `0.0..=1.0`.
    pub pixel_density: f64,
    /// Width of the tightest box around all foreground pixels.
    pub content_box_width: f64,
    /// Height of the tightest box around all foreground pixels.
    pub content_box_height: f64,
    /// Weighted centroid minus the content box's horizontal center.
    pub visual_center_offset_x: f64,
    /// Weighted centroid minus the content box's vertical center.
    pub visual_center_offset_y: f64,
}

impl Features {
    /// Features of an image with no detectable foreground: neutral density,
    /// the full image as content box, and no offset.
    pub fn neutral(original: Size) -> Self {
        Self {
            pixel_density: NEUTRAL_PIXEL_DENSITY,
            content_box_width: original.width as f64,
            content_box_height: original.height as f64,
            visual_center_offset_x: 0.0,
            visual_center_offset_y: 0.0,
        }
    }

    /// Map the content box and offsets into a coordinate space scaled by
    /// `(scale_x, scale_y)`. Density is scale-invariant.
    pub fn rescaled(self, scale_x: f64, scale_y: f64) -> Self {
        Self {
            pixel_density: self.pixel_density,
            content_box_width: self.content_box_width * scale_x,
            content_box_height: self.content_box_height * scale_y,
            visual_center_offset_x: self.visual_center_offset_x * scale_x,
            visual_center_offset_y: self.visual_center_offset_y * scale_y,
        }
    }
}

/// Measure the visual features of `buffer`.
///
/// Never fails: an image with no pixel passing `contrast_threshold` yields
/// [`Features::neutral`] for its original size.
///
/// # Example
///
/// ```
/// use zenlogo::measure::{measure, Features};
/// use zenlogo::pixels::{PixelBuffer, Size};
///
/// let white = [255u8; 8 * 8 * 4];
/// let buffer = PixelBuffer::unscaled(&white, Size::new(8, 8)).unwrap();
/// assert_eq!(measure(&buffer, 10), Features::neutral(Size::new(8, 8)));
/// ```
pub fn measure(buffer: &PixelBuffer<'_>, contrast_threshold: u8) -> Features {
    let background = detect_background(buffer);
    analyze(buffer, contrast_threshold, background).unwrap_or_else(|| {
        log::debug!("no foreground above contrast threshold {contrast_threshold}; using neutral features");
        Features::neutral(buffer.original_size())
    })
}

/// Measure a rasterized vector image and express the result in the vector's
/// intrinsic coordinate space.
///
/// `buffer`'s original size is the rendered raster size. Returns `None` when
/// the intrinsic size is not positive.
pub fn measure_rendered(
    buffer: &PixelBuffer<'_>,
    contrast_threshold: u8,
    intrinsic_width: f64,
    intrinsic_height: f64,
) -> Option<Features> {
    if !(intrinsic_width > 0.0 && intrinsic_height > 0.0) {
        return None;
    }
    let rendered = buffer.original_size();
    let scale_x = intrinsic_width / rendered.width as f64;
    let scale_y = intrinsic_height / rendered.height as f64;
    Some(measure(buffer, contrast_threshold).rescaled(scale_x, scale_y))
}

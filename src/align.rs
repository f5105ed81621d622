//! Visual-center alignment: the translation that moves a logo's weighted
//! centroid onto the center of its layout box.

use core::fmt;
use core::str::FromStr;

use crate::math;
use crate::measure::Features;
use crate::pixels::Size;

/// Which axes receive a centering translation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignBy {
    /// Align by the geometric bounding box; never translate.
    Bounds,
    /// Translate on both axes.
    VisualCenter,
    /// Translate horizontally only.
    VisualCenterX,
    /// Translate vertically only.
    #[default]
    VisualCenterY,
}

impl AlignBy {
    /// Parse a mode name. Surrounding whitespace and ASCII case are ignored;
    /// the empty string means [`Bounds`](Self::Bounds).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("bounds") {
            Some(Self::Bounds)
        } else if s.eq_ignore_ascii_case("visual-center") {
            Some(Self::VisualCenter)
        } else if s.eq_ignore_ascii_case("visual-center-x") {
            Some(Self::VisualCenterX)
        } else if s.eq_ignore_ascii_case("visual-center-y") {
            Some(Self::VisualCenterY)
        } else {
            None
        }
    }

    /// Canonical mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bounds => "bounds",
            Self::VisualCenter => "visual-center",
            Self::VisualCenterX => "visual-center-x",
            Self::VisualCenterY => "visual-center-y",
        }
    }

    /// Whether any visual-center measurement is needed.
    pub fn is_visual(self) -> bool {
        self != Self::Bounds
    }

    /// Whether the horizontal axis is translated.
    pub fn aligns_x(self) -> bool {
        matches!(self, Self::VisualCenter | Self::VisualCenterX)
    }

    /// Whether the vertical axis is translated.
    pub fn aligns_y(self) -> bool {
        matches!(self, Self::VisualCenter | Self::VisualCenterY)
    }
}

impl fmt::Display for AlignBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized alignment mode name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected bounds|visual-center|visual-center-x|visual-center-y")]
pub struct ParseAlignError;

impl FromStr for AlignBy {
    type Err = ParseAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(ParseAlignError)
    }
}

/// Translation in render pixels, rounded to one decimal place.
///
/// Displays as a CSS `translate()` value: `translate(0px, 12.3px)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformOffset {
    /// Horizontal shift; positive moves right.
    pub dx: f64,
    /// Vertical shift; positive moves down.
    pub dy: f64,
}

impl fmt::Display for TransformOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are pre-rounded, so the shortest representation is at most
        // one decimal and integers print without a point.
        write!(f, "translate({}px, {}px)", self.dx, self.dy)
    }
}

/// Translation that centers the logo on its visual mass.
///
/// `normalized` is the render size from [`crate::dimension`]; offsets in
/// `features` are scaled from content-box pixels into render pixels. When the
/// content box is not positive the intrinsic size stands in for it.
///
/// Returns `None` for [`AlignBy::Bounds`], for unmeasured features, for a
/// degenerate box, and when both components round to zero.
///
/// # Example
///
/// ```
/// use zenlogo::align::{visual_center_offset, AlignBy};
/// use zenlogo::measure::Features;
/// use zenlogo::pixels::Size;
///
/// let features = Features {
///     pixel_density: 0.3,
///     content_box_width: 100.0,
///     content_box_height: 100.0,
///     visual_center_offset_x: 4.0,
///     visual_center_offset_y: -10.0,
/// };
/// let offset = visual_center_offset(
///     Some(&features), Size::new(50, 50), AlignBy::VisualCenterY, 100.0, 100.0,
/// ).unwrap();
/// assert_eq!(offset.to_string(), "translate(0px, 5px)");
/// ```
pub fn visual_center_offset(
    features: Option<&Features>,
    normalized: Size,
    align_by: AlignBy,
    intrinsic_width: f64,
    intrinsic_height: f64,
) -> Option<TransformOffset> {
    if !align_by.is_visual() {
        return None;
    }
    let features = features?;

    let content_w = positive_or(features.content_box_width, intrinsic_width);
    let content_h = positive_or(features.content_box_height, intrinsic_height);
    if !(content_w > 0.0 && content_h > 0.0) {
        return None;
    }

    let scale_x = normalized.width as f64 / content_w;
    let scale_y = normalized.height as f64 / content_h;

    let dx = if align_by.aligns_x() {
        -features.visual_center_offset_x * scale_x
    } else {
        0.0
    };
    let dy = if align_by.aligns_y() {
        -features.visual_center_offset_y * scale_y
    } else {
        0.0
    };

    let offset = TransformOffset {
        dx: math::round_tenth(dx),
        dy: math::round_tenth(dy),
    };
    (offset.dx != 0.0 || offset.dy != 0.0).then_some(offset)
}

fn positive_or(v: f64, fallback: f64) -> f64 {
    if v > 0.0 { v } else { fallback }
}

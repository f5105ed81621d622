//! Inline CSS rendering of a computed logo style.

use core::fmt;

use crate::align::TransformOffset;
use crate::dimension::SizeNormalizer;
use crate::pixels::Size;

/// Render size and optional centering translation for one logo.
///
/// Displays as an inline `style` attribute value:
///
/// ```
/// use zenlogo::align::TransformOffset;
/// use zenlogo::css::LogoStyle;
/// use zenlogo::pixels::Size;
///
/// let style = LogoStyle {
///     size: Size::new(68, 34),
///     transform: Some(TransformOffset { dx: 0.0, dy: -2.5 }),
/// };
/// assert_eq!(
///     style.to_string(),
///     "width: 68px; height: 34px; object-fit: contain; display: block; transform: translate(0px, -2.5px);"
/// );
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogoStyle {
    /// Normalized render size.
    pub size: Size,
    /// Visual-center translation, if any.
    pub transform: Option<TransformOffset>,
}

impl LogoStyle {
    /// Style used when nothing about the logo is known: a `base_size` square
    /// with no translation.
    pub fn fallback(base_size: f64) -> Self {
        Self {
            size: SizeNormalizer::new(base_size).compute(0.0, 0.0, None),
            transform: None,
        }
    }

    /// Whether a translation is present.
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }
}

impl fmt::Display for LogoStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "width: {}px; height: {}px; object-fit: contain; display: block;",
            self.size.width, self.size.height
        )?;
        if let Some(transform) = &self.transform {
            write!(f, " transform: {transform};")?;
        }
        Ok(())
    }
}

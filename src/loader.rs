//! Decoding and budgeted resampling of raster logos.
//!
//! Any format the `image` crate decodes is normalized to RGBA8 (gray is
//! replicated across the color channels, missing alpha becomes opaque) and
//! resampled so its pixel count stays near a budget. The result borrows into
//! a [`PixelBuffer`] for measurement.
//!
//! SVG markup is rasterized with `resvg` directly at the budgeted sample size.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat};
use resvg::{tiny_skia, usvg};

use crate::math;
use crate::pixels::{PixelBuffer, PixelBufferError, Size};

pub use crate::options::DEFAULT_PIXEL_BUDGET;

/// Failure to produce a measurable raster.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be read or decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// SVG markup could not be parsed for rendering.
    #[error("failed to parse SVG for rendering: {0}")]
    Render(#[from] usvg::Error),
    /// The decoded raster has no pixels.
    #[error(transparent)]
    Buffer(#[from] PixelBufferError),
}

/// Sample size for an `original`-sized image under `pixel_budget`.
///
/// Images at or under the budget keep their size. Larger ones are scaled by
/// `sqrt(budget / area)` on both axes, each side rounded and kept at least 1.
///
/// ```
/// use zenlogo::loader::sample_size;
/// use zenlogo::pixels::Size;
///
/// assert_eq!(sample_size(Size::new(40, 40), 2048), Size::new(40, 40));
/// assert_eq!(sample_size(Size::new(400, 100), 2500), Size::new(100, 25));
/// ```
pub fn sample_size(original: Size, pixel_budget: u32) -> Size {
    if original.is_empty() {
        return Size::new(1, 1);
    }
    let total = original.area();
    let ratio = if total > pixel_budget as u64 {
        math::sqrt(pixel_budget as f64 / total as f64)
    } else {
        1.0
    };
    let ratio = math::sane_scale(ratio);
    let side = |v: u32| (math::round(v as f64 * ratio) as u32).max(1);
    Size::new(side(original.width), side(original.height))
}

/// An owned RGBA8 sample and the size of the image it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampledImage {
    /// Row-major RGBA8 bytes of the sample.
    pub bytes: Vec<u8>,
    /// Dimensions of `bytes`.
    pub sample: Size,
    /// Dimensions of the decoded source.
    pub original: Size,
}

impl SampledImage {
    /// Borrow as a [`PixelBuffer`].
    pub fn as_buffer(&self) -> Result<PixelBuffer<'_>, PixelBufferError> {
        PixelBuffer::new(&self.bytes, self.sample, self.original)
    }
}

/// Convert `image` to RGBA8 and resample it to fit `pixel_budget`.
///
/// A zero-sized image is passed through; [`SampledImage::as_buffer`] rejects it.
pub fn sample(image: &DynamicImage, pixel_budget: u32) -> SampledImage {
    let (width, height) = image.dimensions();
    let original = Size::new(width, height);
    let target = if original.is_empty() {
        original
    } else {
        sample_size(original, pixel_budget)
    };

    let rgba = image.to_rgba8();
    let rgba = if target == original {
        rgba
    } else {
        imageops::resize(&rgba, target.width, target.height, FilterType::Triangle)
    };
    log::trace!(
        "sampled {}x{} -> {}x{} (budget {pixel_budget})",
        original.width,
        original.height,
        target.width,
        target.height
    );

    SampledImage {
        bytes: rgba.into_raw(),
        sample: target,
        original,
    }
}

/// Decode the file at `path` and sample it.
pub fn load_path(path: &Path, pixel_budget: u32) -> Result<SampledImage, LoadError> {
    let image = image::open(path)?;
    Ok(sample(&image, pixel_budget))
}

/// Decode `bytes` and sample them.
///
/// The format is sniffed from the content; `format_hint` is used only when
/// sniffing fails.
pub fn load_bytes(
    bytes: &[u8],
    format_hint: Option<ImageFormat>,
    pixel_budget: u32,
) -> Result<SampledImage, LoadError> {
    let format = match (image::guess_format(bytes), format_hint) {
        (Ok(format), _) => format,
        (Err(_), Some(hint)) => hint,
        (Err(e), None) => return Err(e.into()),
    };
    let image = image::load_from_memory_with_format(bytes, format)?;
    Ok(sample(&image, pixel_budget))
}

/// Rasterize SVG markup at its own size scaled to fit `pixel_budget`.
///
/// `original` of the result is the document's rendered size (whole pixels,
/// at least 1×1); `sample` is the size actually drawn. Colors are
/// un-premultiplied. Text elements are not rendered.
pub fn render_svg(markup: &str, pixel_budget: u32) -> Result<SampledImage, LoadError> {
    let tree = usvg::Tree::from_str(markup, &usvg::Options::default())?;
    let size = tree.size().to_int_size();
    let original = Size::new(size.width(), size.height());
    let target = sample_size(original, pixel_budget);

    let mut pixmap =
        tiny_skia::Pixmap::new(target.width, target.height).ok_or(PixelBufferError::TooLarge)?;
    let transform = tiny_skia::Transform::from_scale(
        target.width as f32 / original.width as f32,
        target.height as f32 / original.height as f32,
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    log::trace!(
        "rendered svg {}x{} at {}x{} (budget {pixel_budget})",
        original.width,
        original.height,
        target.width,
        target.height
    );

    let bytes = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(SampledImage {
        bytes,
        sample: target,
        original,
    })
}

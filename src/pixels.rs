//! Borrowed RGBA8 pixel buffers and the sizes that describe them.
//!
//! The measurement pipeline never decodes anything itself. It reads a
//! [`PixelBuffer`]: a fully materialized RGBA8 raster that was usually
//! downsampled to a pixel budget, together with the intrinsic size of the
//! image it was sampled from. Sample-space coordinates are mapped back to
//! original-space coordinates using the ratio of the two sizes.

/// Bytes per RGBA8 pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered, without overflow.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Reasons a byte slice cannot be viewed as a [`PixelBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PixelBufferError {
    /// Sample or original size has a zero dimension.
    #[error("pixel buffer dimensions must be non-zero")]
    ZeroDimension,
    /// `bytes.len()` does not equal `sample_width * sample_height * 4`.
    #[error("expected {expected} RGBA bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The sample size does not fit in addressable memory.
    #[error("pixel buffer dimensions overflow usize")]
    TooLarge,
}

/// Read-only view of an RGBA8 raster plus the intrinsic size it came from.
///
/// # Example
///
/// ```
/// use zenlogo::pixels::{PixelBuffer, Size};
///
/// let bytes = [255u8; 4 * 4 * 4];
/// let buffer = PixelBuffer::new(&bytes, Size::new(4, 4), Size::new(400, 400)).unwrap();
/// assert_eq!(buffer.rgba(3, 3), [255, 255, 255, 255]);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    bytes: &'a [u8],
    sample: Size,
    original: Size,
}

impl<'a> PixelBuffer<'a> {
    /// View `bytes` as a `sample`-sized raster taken from an `original`-sized image.
    pub fn new(bytes: &'a [u8], sample: Size, original: Size) -> Result<Self, PixelBufferError> {
        if sample.is_empty() || original.is_empty() {
            return Err(PixelBufferError::ZeroDimension);
        }
        let expected = usize::try_from(sample.area())
            .ok()
            .and_then(|px| px.checked_mul(RGBA_CHANNELS))
            .ok_or(PixelBufferError::TooLarge)?;
        if bytes.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            sample,
            original,
        })
    }

    /// View a raster that was scanned at its intrinsic size.
    pub fn unscaled(bytes: &'a [u8], size: Size) -> Result<Self, PixelBufferError> {
        Self::new(bytes, size, size)
    }

    /// Raw RGBA bytes, row-major.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Dimensions of the raster actually stored in [`bytes`](Self::bytes).
    pub fn sample_size(&self) -> Size {
        self.sample
    }

    /// Intrinsic dimensions of the image before downsampling.
    pub fn original_size(&self) -> Size {
        self.original
    }

    /// Pixel at `(x, y)` in sample space.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the sample size.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.sample.width && y < self.sample.height,
            "({x},{y}) out of bounds {}x{}",
            self.sample.width,
            self.sample.height
        );
        let i = (y as usize * self.sample.width as usize + x as usize) * RGBA_CHANNELS;
        [
            self.bytes[i],
            self.bytes[i + 1],
            self.bytes[i + 2],
            self.bytes[i + 3],
        ]
    }

    /// Rows of RGBA bytes, top to bottom. Each row is `sample_width * 4` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + use<'a> {
        self.bytes
            .chunks_exact(self.sample.width as usize * RGBA_CHANNELS)
    }

    /// Ratio of original to sample size on each axis.
    pub(crate) fn scale(&self) -> (f64, f64) {
        (
            self.original.width as f64 / self.sample.width as f64,
            self.original.height as f64 / self.sample.height as f64,
        )
    }
}

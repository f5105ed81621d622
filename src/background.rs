//! Background inference from the border of a raster.
//!
//! Logos are usually either cut out on transparency or placed on a flat
//! backdrop. Only the outermost ring of pixels is inspected: if enough of it
//! is see-through, the background is transparent; otherwise the most common
//! coarse color on the ring is taken as the backdrop.
//!
//! ```text
//!     sampled pixels (x) on a 5×4 raster
//!
//!     x x x x x
//!     x . . . x
//!     x . . . x
//!     x x x x x
//! ```

use crate::pixels::PixelBuffer;

/// Bits dropped from each channel before bucketing (8 levels per channel).
pub const QUANTIZATION_SHIFT: u32 = 5;
/// Border pixels with alpha below this count as transparent.
pub const ALPHA_TRANSPARENCY_THRESHOLD: u8 = 128;
/// Fraction of transparent border pixels above which the whole background
/// is treated as transparent.
pub const TRANSPARENT_BORDER_RATIO: f64 = 0.1;

const LEVELS: usize = 1 << (8 - QUANTIZATION_SHIFT);
const BUCKET_COUNT: usize = LEVELS * LEVELS * LEVELS;

/// Estimated background of a raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    /// The border is mostly see-through; foreground is judged by alpha alone.
    Transparent,
    /// The border is mostly opaque; foreground is judged by distance from this color.
    Opaque { r: u8, g: u8, b: u8 },
}

impl Background {
    /// Opaque white, used when no border pixel is usable.
    pub const WHITE: Self = Self::Opaque {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Whether the background is transparent.
    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }
}

/// Accumulated border pixels falling into one quantized color bin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct ColorBucket {
    count: u32,
    sum_r: u64,
    sum_g: u64,
    sum_b: u64,
}

impl ColorBucket {
    const EMPTY: Self = Self {
        count: 0,
        sum_r: 0,
        sum_g: 0,
        sum_b: 0,
    };

    /// Mean color, each channel rounded half up. `count` must be non-zero.
    fn mean(&self) -> (u8, u8, u8) {
        let n = self.count as u64;
        let avg = |sum: u64| ((2 * sum + n) / (2 * n)).min(255) as u8;
        (avg(self.sum_r), avg(self.sum_g), avg(self.sum_b))
    }
}

/// Quantized color histogram over the border ring, plus transparency counts.
#[derive(Clone, Debug)]
struct Histogram {
    buckets: [ColorBucket; BUCKET_COUNT],
    opaque: u32,
    transparent: u32,
}

impl Histogram {
    fn new() -> Self {
        Self {
            buckets: [ColorBucket::EMPTY; BUCKET_COUNT],
            opaque: 0,
            transparent: 0,
        }
    }

    fn record(&mut self, [r, g, b, a]: [u8; 4]) {
        if a < ALPHA_TRANSPARENCY_THRESHOLD {
            self.transparent += 1;
            return;
        }
        self.opaque += 1;
        let bucket = &mut self.buckets[bucket_index(r, g, b)];
        bucket.count += 1;
        bucket.sum_r += r as u64;
        bucket.sum_g += g as u64;
        bucket.sum_b += b as u64;
    }

    fn is_mostly_transparent(&self) -> bool {
        let total = self.opaque + self.transparent;
        total > 0 && self.transparent as f64 > total as f64 * TRANSPARENT_BORDER_RATIO
    }

    /// The bucket with the strictly largest count. On ties the lowest bucket
    /// index wins; this ordering is part of the output contract.
    fn dominant(&self) -> Option<&ColorBucket> {
        let mut best: Option<&ColorBucket> = None;
        for bucket in &self.buckets {
            if bucket.count > best.map_or(0, |b| b.count) {
                best = Some(bucket);
            }
        }
        best
    }

    fn estimate(&self) -> Background {
        if self.is_mostly_transparent() {
            return Background::Transparent;
        }
        match self.dominant() {
            Some(bucket) => {
                let (r, g, b) = bucket.mean();
                Background::Opaque { r, g, b }
            }
            None => Background::WHITE,
        }
    }
}

fn bucket_index(r: u8, g: u8, b: u8) -> usize {
    let q = |c: u8| (c >> QUANTIZATION_SHIFT) as usize;
    (q(r) * LEVELS + q(g)) * LEVELS + q(b)
}

/// Coordinates of the border ring, each visited exactly once.
///
/// Top row, bottom row (when `height > 1`), then the left and right columns of
/// the interior rows (right only when `width > 1`).
fn border_pixels(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let bottom = height.checked_sub(1).filter(|&y| y > 0);
    let right = width.checked_sub(1).filter(|&x| x > 0);
    let rows = (0..width)
        .flat_map(move |x| core::iter::once((x, 0)).chain(bottom.map(|y| (x, y))));
    let columns = (1..height.saturating_sub(1))
        .flat_map(move |y| core::iter::once((0, y)).chain(right.map(|x| (x, y))));
    rows.chain(columns)
}

/// Infer the background of `buffer` from its border pixels.
///
/// Costs O(width + height). Returns [`Background::Transparent`] when more
/// than [`TRANSPARENT_BORDER_RATIO`] of the border has alpha below
/// [`ALPHA_TRANSPARENCY_THRESHOLD`]; otherwise the mean color of the most
/// populated quantization bucket, or [`Background::WHITE`] when the border
/// had no opaque pixel at all.
pub fn detect_background(buffer: &PixelBuffer<'_>) -> Background {
    let size = buffer.sample_size();
    let mut histogram = Histogram::new();
    for (x, y) in border_pixels(size.width, size.height) {
        histogram.record(buffer.rgba(x, y));
    }
    let background = histogram.estimate();
    log::trace!(
        "border: {} opaque, {} transparent -> {background:?}",
        histogram.opaque,
        histogram.transparent
    );
    background
}

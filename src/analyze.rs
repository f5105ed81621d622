//! Full-frame contrast scan producing the content box and weighted centroid.

use crate::background::Background;
use crate::math;
use crate::measure::Features;
use crate::pixels::{PixelBuffer, RGBA_CHANNELS};

/// Inclusive sample-space bounds of every foreground pixel seen so far.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Bounds {
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl Bounds {
    fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    fn area(&self) -> u64 {
        (self.max_x - self.min_x + 1) as u64 * (self.max_y - self.min_y + 1) as u64
    }
}

/// Running sums over foreground pixels.
#[derive(Clone, Debug, Default)]
struct Accumulator {
    bounds: Option<Bounds>,
    total_weight: f64,
    weighted_x: f64,
    weighted_y: f64,
    filled_pixels: u64,
    total_opacity: f64,
}

impl Accumulator {
    fn add(&mut self, x: u32, y: u32, weight: f64, opacity: f64) {
        match &mut self.bounds {
            Some(b) => b.include(x, y),
            None => self.bounds = Some(Bounds::at(x, y)),
        }
        self.total_weight += weight;
        self.weighted_x += (x as f64 + 0.5) * weight;
        self.weighted_y += (y as f64 + 0.5) * weight;
        self.filled_pixels += 1;
        self.total_opacity += opacity;
    }
}

/// Weight and opacity of a pixel, or `None` if it belongs to the background.
///
/// `min_distance_sq` is the per-channel threshold generalized to RGB space
/// (`threshold² × 3`).
#[inline]
fn classify(
    [r, g, b, a]: [u8; 4],
    contrast_threshold: u8,
    min_distance_sq: u32,
    background: Background,
) -> Option<(f64, f64)> {
    if a <= contrast_threshold {
        return None;
    }
    match background {
        Background::Transparent => {
            let alpha = a as f64;
            Some((alpha * alpha, alpha))
        }
        Background::Opaque {
            r: bg_r,
            g: bg_g,
            b: bg_b,
        } => {
            let dr = r.abs_diff(bg_r) as u32;
            let dg = g.abs_diff(bg_g) as u32;
            let db = b.abs_diff(bg_b) as u32;
            let dist_sq = dr * dr + dg * dg + db * db;
            if dist_sq < min_distance_sq {
                return None;
            }
            let weight = dist_sq as f64 * a as f64;
            let opacity = (a as f64).min(math::sqrt(dist_sq as f64));
            Some((weight, opacity))
        }
    }
}

/// Scan every sampled pixel and measure the foreground.
///
/// A pixel is foreground when its alpha exceeds `contrast_threshold` and,
/// for an opaque `background`, its squared RGB distance from the background
/// is at least `contrast_threshold² × 3`. Foreground pixels are weighted by
/// `alpha²` on transparent backgrounds and by `distance² × alpha` otherwise.
///
/// Returns `None` when no pixel qualifies. The content box and offsets of the
/// result are in original-image pixels; offsets are measured from the
/// content box's geometric center.
pub fn analyze(
    buffer: &PixelBuffer<'_>,
    contrast_threshold: u8,
    background: Background,
) -> Option<Features> {
    let threshold = contrast_threshold as u32;
    let min_distance_sq = threshold * threshold * 3;

    let mut acc = Accumulator::default();
    for (y, row) in buffer.rows().enumerate() {
        for (x, px) in row.chunks_exact(RGBA_CHANNELS).enumerate() {
            let px = [px[0], px[1], px[2], px[3]];
            if let Some((weight, opacity)) =
                classify(px, contrast_threshold, min_distance_sq, background)
            {
                acc.add(x as u32, y as u32, weight, opacity);
            }
        }
    }

    let bounds = acc.bounds?;
    let features = summarize(buffer, &acc, bounds);
    log::trace!(
        "foreground: {} px in {:?} (sample space) -> {features:?}",
        acc.filled_pixels,
        bounds
    );
    Some(features)
}

fn summarize(buffer: &PixelBuffer<'_>, acc: &Accumulator, bounds: Bounds) -> Features {
    let filled = acc.filled_pixels as f64;
    let coverage_ratio = filled / bounds.area() as f64;
    let average_opacity = acc.total_opacity / 255.0 / filled;
    let pixel_density = coverage_ratio * average_opacity;

    let original = buffer.original_size();
    let (ow, oh) = (original.width as f64, original.height as f64);
    let (scale_x, scale_y) = buffer.scale();

    let box_x = math::floor(bounds.min_x as f64 * scale_x);
    let box_y = math::floor(bounds.min_y as f64 * scale_y);
    let right = math::ceil((bounds.max_x + 1) as f64 * scale_x).clamp(0.0, ow);
    let bottom = math::ceil((bounds.max_y + 1) as f64 * scale_y).clamp(0.0, oh);
    let content_box_width = (right - box_x).clamp(1.0, ow);
    let content_box_height = (bottom - box_y).clamp(1.0, oh);

    let (visual_center_offset_x, visual_center_offset_y) = if acc.total_weight > 0.0 {
        let center_x = acc.weighted_x / acc.total_weight * scale_x;
        let center_y = acc.weighted_y / acc.total_weight * scale_y;
        (
            center_x - box_x - content_box_width / 2.0,
            center_y - box_y - content_box_height / 2.0,
        )
    } else {
        (0.0, 0.0)
    };

    Features {
        pixel_density,
        content_box_width,
        content_box_height,
        visual_center_offset_x,
        visual_center_offset_y,
    }
}

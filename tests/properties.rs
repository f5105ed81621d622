//! Numeric properties of sizing and alignment over arbitrary inputs.

use proptest::prelude::*;
use zenlogo::align::{AlignBy, visual_center_offset};
use zenlogo::dimension::normalize_size;
use zenlogo::measure::{Features, measure};
use zenlogo::pixels::{PixelBuffer, Size};

fn features() -> impl Strategy<Value = Features> {
    (
        0.0..=1.0f64,
        1.0..5000.0f64,
        1.0..5000.0f64,
        -2500.0..2500.0f64,
        -2500.0..2500.0f64,
    )
        .prop_map(|(d, w, h, ox, oy)| Features {
            pixel_density: d,
            content_box_width: w,
            content_box_height: h,
            visual_center_offset_x: ox,
            visual_center_offset_y: oy,
        })
}

proptest! {
    #[test]
    fn normalized_dimensions_are_at_least_one(
        w in 0.001..100_000.0f64,
        h in 0.001..100_000.0f64,
        base in 0.1..512.0f64,
        scale in 0.0..=1.0f64,
        density_factor in 0.0..4.0f64,
        density in proptest::option::of(0.0..=1.0f64),
    ) {
        let size = normalize_size(w, h, base, scale, density_factor, density);
        prop_assert!(size.width >= 1 && size.height >= 1, "{size:?}");
    }

    #[test]
    fn density_scale_stays_within_clamp(
        base in 16.0..256.0f64,
        density_factor in 0.0..8.0f64,
        density in 0.0001..=1.0f64,
    ) {
        let size = normalize_size(100.0, 100.0, base, 0.5, density_factor, Some(density));
        let side = size.width as f64;
        prop_assert!(side >= (base * 0.5).round() && side <= (base * 2.0).round(), "{side} for base {base}");
        prop_assert_eq!(size.width, size.height);
    }

    #[test]
    fn bounds_never_translates(f in features(), w in 1u32..500, h in 1u32..500) {
        let offset = visual_center_offset(Some(&f), Size::new(w, h), AlignBy::Bounds, 100.0, 100.0);
        prop_assert_eq!(offset, None);
    }

    #[test]
    fn translation_opposes_offset(f in features(), w in 1u32..500, h in 1u32..500) {
        if let Some(t) = visual_center_offset(Some(&f), Size::new(w, h), AlignBy::VisualCenter, 100.0, 100.0) {
            prop_assert!(t.dx == 0.0 || t.dx.signum() == -f.visual_center_offset_x.signum());
            prop_assert!(t.dy == 0.0 || t.dy.signum() == -f.visual_center_offset_y.signum());
        }
    }

    #[test]
    fn measured_box_fits_original(
        sw in 1u32..24,
        sh in 1u32..24,
        ow in 1u32..2000,
        oh in 1u32..2000,
        seed in any::<u64>(),
    ) {
        let mut state = seed;
        let bytes: Vec<u8> = (0..sw * sh * 4)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 56) as u8
            })
            .collect();
        let buffer = PixelBuffer::new(&bytes, Size::new(sw, sh), Size::new(ow, oh)).unwrap();
        let f = measure(&buffer, 10);
        prop_assert!(f.content_box_width >= 1.0 && f.content_box_width <= ow as f64);
        prop_assert!(f.content_box_height >= 1.0 && f.content_box_height <= oh as f64);
        prop_assert!((0.0..=1.0).contains(&f.pixel_density), "{}", f.pixel_density);
    }
}

#![allow(dead_code)]

use mask2coco::ir::{BBoxXYWH, BinaryMask};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Random binary masks up to `max_side` pixels per side.
pub fn arb_mask(max_side: u32) -> BoxedStrategy<BinaryMask> {
    (1..=max_side, 1..=max_side)
        .prop_flat_map(|(width, height)| {
            let len = (width * height) as usize;
            (
                Just(width),
                Just(height),
                prop::collection::vec(prop::bool::weighted(0.4), len),
            )
        })
        .prop_map(|(width, height, bits)| {
            let data = bits.into_iter().map(u8::from).collect();
            BinaryMask::new(width, height, data).expect("generated mask is valid")
        })
        .boxed()
}

/// Masks with at least one foreground pixel.
pub fn arb_nonempty_mask(max_side: u32) -> BoxedStrategy<BinaryMask> {
    arb_mask(max_side)
        .prop_filter("mask has foreground", |m| m.count_foreground() > 0)
        .boxed()
}

/// Tight box around the foreground, found by scanning every pixel.
pub fn scan_bbox(mask: &BinaryMask) -> BBoxXYWH {
    let (width, height) = mask.dimensions();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        for x in 0..width {
            if mask.get(x, y) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    match bounds {
        Some((x0, y0, x1, y1)) => BBoxXYWH::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1),
        None => BBoxXYWH::default(),
    }
}

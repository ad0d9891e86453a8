//! Fuzz target for mask geometry.
//!
//! The first two bytes pick the mask size; every following bit is a pixel.
//! Checks that encoding, area, box and polygon extraction never panic and
//! that the area agrees with the pixel count.
//!
//! Run with:
//!   cargo +nightly fuzz run mask_geometry

#![no_main]

use libfuzzer_sys::fuzz_target;
use mask2coco::geometry::{area, bounding_box, encode, polygons};
use mask2coco::ir::BinaryMask;

fuzz_target!(|data: &[u8]| {
    let [w, h, bits @ ..] = data else {
        return;
    };
    let width = u32::from(*w % 64) + 1;
    let height = u32::from(*h % 64) + 1;

    let mask = BinaryMask::from_fn(width, height, |x, y| {
        let i = (y * width + x) as usize;
        bits.get(i / 8).is_some_and(|b| b & (1 << (i % 8)) != 0)
    });

    let encoded = encode(&mask);
    assert_eq!(area(&encoded), mask.count_foreground() as f64);
    let _ = bounding_box(&encoded);
    for ring in polygons(&mask, 0.0) {
        assert_eq!(ring.as_slice().len() % 2, 0);
    }
});

//! Fuzz target for source manifest parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run manifest_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use mask2coco::source::parse_manifest;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = parse_manifest(data);
});

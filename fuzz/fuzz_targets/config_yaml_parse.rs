//! Fuzz target for YAML configuration parsing and validation.
//!
//! Run with:
//!   cargo +nightly fuzz run config_yaml_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use mask2coco::FormatterConfig;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = FormatterConfig::fuzz_parse_yaml(text);
    }
});

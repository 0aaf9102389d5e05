//! Fuzz target: `parse_labels` + `contains_cat`
//!
//! The first byte picks a confidence threshold, the rest is treated as a
//! label list.  Checks that parsing never panics and that the detection
//! rule agrees with a direct scan of the parsed labels.
//!
//! cargo fuzz run fuzz_label_parser

#![no_main]

use catpoint::adapters::label_detector::{contains_cat, parse_labels};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&threshold, rest)) = data.split_first() else {
        return;
    };
    let threshold = f32::from(threshold % 101);

    let Ok(labels) = parse_labels(rest) else {
        return;
    };

    let expected = labels
        .iter()
        .any(|l| l.confidence >= threshold && l.name.to_lowercase().contains("cat"));
    assert_eq!(contains_cat(&labels, "cat", threshold), expected);
    assert_eq!(contains_cat(&labels, "CAT", threshold), expected);
});

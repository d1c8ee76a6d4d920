//! Fuzz target for protocol line parsing
//!
//! Feeds randomly generated input to the line parser and ensures it
//! never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings to focus on protocol-level issues
    if let Ok(input) = str::from_utf8(data) {
        // Skip very long inputs (over 512 bytes is unusual for IRC)
        if input.len() > 512 {
            return;
        }

        // Line parsing - should never panic
        let _ = coirc::Line::parse(input);
    }
});

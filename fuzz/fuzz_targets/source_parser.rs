//! Fuzz target for actor prefix decomposition

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = str::from_utf8(data) {
        if input.len() > 512 {
            return;
        }

        // Prefix decomposition - should never panic, and re-display of
        // a user identity must round-trip.
        let source = coirc::Source::parse(input);
        if let coirc::Source::User { .. } = &source {
            assert_eq!(source.to_string(), input);
        }
    }
});

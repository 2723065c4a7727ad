//! Fuzz target for identifier classification.
//!
//! A present identifier is never reported as missing, and the default
//! format agrees with a plain character check.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::identifier::classify;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let result = classify(Some(&*input));
    assert!(!result.is_missing);

    let bytes = input.as_bytes();
    let proper = bytes.len() == 4
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2..].iter().all(u8::is_ascii_alphabetic);
    assert_eq!(result.is_improper_format, !proper);
});

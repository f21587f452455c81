#![no_main]
use craftbook_core::Dataset;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected with an error, never a panic.
    let _ = Dataset::from_snapshot(data);
});

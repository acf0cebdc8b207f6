#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic, whether or not they happen to
    // contain a valid metadata marker.
    let _ = mmdb::Reader::from_bytes(data.to_vec());
});

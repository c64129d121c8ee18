#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as a synthesis config
    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = protofuzz::config::load_from_str(yaml);
    }
});

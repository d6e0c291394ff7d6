#![no_main]

use libfuzzer_sys::fuzz_target;
use morsegate::replay::{parse_log, read_log};

fuzz_target!(|data: &[u8]| {
    // Raw bytes go through the reader so invalid UTF-8 is exercised too
    let _ = read_log(data);

    if let Ok(input) = std::str::from_utf8(data) {
        // Should not panic regardless of input
        let _ = parse_log(input);
    }
});

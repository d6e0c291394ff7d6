#![no_main]

use libfuzzer_sys::fuzz_target;
use morsegate::pattern::Pattern;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing is total: every input yields a pattern of its symbol count
        let pattern = Pattern::parse(input);
        let symbols = input.chars().filter(|c| *c == '.' || *c == '-').count();
        assert_eq!(pattern.len(), symbols);
    }
});

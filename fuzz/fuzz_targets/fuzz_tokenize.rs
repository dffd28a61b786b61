#![no_main]
use html_diff_tools::{tokenize, DiffConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = tokenize(s, &DiffConfig::default());
    }
});

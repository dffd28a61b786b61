#![no_main]
use html_diff_tools::{diff_list, DiffConfig};
use libfuzzer_sys::fuzz_target;

/// Fuzz the list diff with arbitrary item markup inside two lists.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (old, new) = s.split_once('\0').unwrap_or((s, s));
        let _ = diff_list(
            &format!("<ul>{old}</ul>"),
            &format!("<ul>{new}</ul>"),
            &DiffConfig::default(),
        );
    }
});

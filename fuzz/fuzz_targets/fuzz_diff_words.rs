#![no_main]
use html_diff_tools::{diff_words, DiffConfig};
use libfuzzer_sys::fuzz_target;

/// Fuzz the word diff.
///
/// The input is split at the first NUL byte into an old and a new document.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (old, new) = s.split_once('\0').unwrap_or((s, ""));
        let _ = diff_words(old, new, &DiffConfig::default());
    }
});

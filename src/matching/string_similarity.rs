//! String similarity primitives for list-item matching.
//!
//! All lengths and positions are counted in `char`s so multi-byte text
//! compares the same way ASCII does.

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static tag pattern"));

/// Remove every `<...>` run from `s`.
#[must_use]
pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Longest common substring of `a` and `b`.
///
/// Returns `(start_in_a, start_in_b, len)`. Ties resolve to the earliest
/// start in `a`, then the earliest start in `b`.
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            let len = curr[j + 1];
            if len == 0 {
                continue;
            }
            let start = (i + 1 - len, j + 1 - len);
            if len > best.2 || (len == best.2 && start < (best.0, best.1)) {
                best = (start.0, start.1, len);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Number of characters `a` and `b` have in common.
///
/// Finds the longest common substring, then repeats on the pieces to its
/// left and to its right.
#[must_use]
pub fn similar_text(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut sum = 0;
    let mut pending = vec![(0..a.len(), 0..b.len())];
    while let Some((ra, rb)) = pending.pop() {
        if ra.is_empty() || rb.is_empty() {
            continue;
        }
        let (pa, pb, len) = longest_common_substring(&a[ra.clone()], &b[rb.clone()]);
        if len == 0 {
            continue;
        }
        sum += len;

        let (abs_a, abs_b) = (ra.start + pa, rb.start + pb);
        pending.push((ra.start..abs_a, rb.start..abs_b));
        pending.push((abs_a + len..ra.end, abs_b + len..rb.end));
    }

    sum
}

/// `similar_text` as a percentage of the combined length.
///
/// Two empty strings are 100% similar.
#[must_use]
pub fn similar_text_percent(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }
    (similar_text(a, b) * 200) as f64 / total as f64
}

/// Length of the shared leading run of characters.
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Length of the shared trailing run of characters.
#[must_use]
pub fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

//! Matching-block discovery.
//!
//! [`BlockAligner`] finds the longest run of equal tokens in a range, then
//! repeats on the sub-ranges to its left and right. Tags compare by name
//! only. [`longest_common_subsequence`] is the table-driven variant used for
//! list items, where equality is a caller-supplied [`MatchStrategy`].

use crate::matching::MatchStrategy;
use crate::model::{is_whitespace_token, MatchingBlock};
use crate::parsers::tags::normalize_token;
use std::borrow::Cow;
use std::collections::HashMap;

// ============================================================================
// Whitespace runs
// ============================================================================

/// Memoized length of the whitespace-only token run starting at each index.
#[derive(Debug)]
struct WhitespaceRuns<'a> {
    words: &'a [String],
    cache: HashMap<usize, usize>,
}

impl<'a> WhitespaceRuns<'a> {
    fn new(words: &'a [String]) -> Self {
        Self {
            words,
            cache: HashMap::new(),
        }
    }

    /// Whether `count` tokens from `start` are all whitespace.
    fn covers(&mut self, start: usize, count: usize) -> bool {
        let words = self.words;
        let run = *self.cache.entry(start).or_insert_with(|| {
            words
                .get(start..)
                .unwrap_or_default()
                .iter()
                .take_while(|w| is_whitespace_token(w))
                .count()
        });
        count <= run
    }
}

// ============================================================================
// Block aligner
// ============================================================================

enum Work {
    Range {
        start_in_old: usize,
        end_in_old: usize,
        start_in_new: usize,
        end_in_new: usize,
    },
    Emit(MatchingBlock),
}

/// Per-call alignment state: the new-side word index and whitespace cache.
#[derive(Debug)]
pub struct BlockAligner<'a> {
    old: &'a [String],
    new: &'a [String],
    group_diffs: bool,
    word_index: HashMap<Cow<'a, str>, Vec<usize>>,
    whitespace: WhitespaceRuns<'a>,
}

impl<'a> BlockAligner<'a> {
    /// Index `new` for alignment against `old`.
    #[must_use]
    pub fn new(old: &'a [String], new: &'a [String], group_diffs: bool) -> Self {
        let mut word_index: HashMap<Cow<'a, str>, Vec<usize>> = HashMap::new();
        for (i, word) in new.iter().enumerate() {
            word_index.entry(normalize_token(word)).or_default().push(i);
        }

        Self {
            old,
            new,
            group_diffs,
            word_index,
            whitespace: WhitespaceRuns::new(old),
        }
    }

    /// Longest matching block within the given ranges.
    ///
    /// With `group_diffs`, a whitespace-only best block is displaced by any
    /// later block at least as long, and is rejected outright if it survives.
    pub fn find_match(
        &mut self,
        start_in_old: usize,
        end_in_old: usize,
        start_in_new: usize,
        end_in_new: usize,
    ) -> Option<MatchingBlock> {
        let mut best = MatchingBlock::new(start_in_old, start_in_new, 0);
        let mut match_length_at: HashMap<usize, usize> = HashMap::new();

        for index_in_old in start_in_old..end_in_old {
            let mut new_match_length_at = HashMap::new();
            let word = normalize_token(&self.old[index_in_old]);

            if let Some(positions) = self.word_index.get(word.as_ref()) {
                for &index_in_new in positions {
                    if index_in_new < start_in_new {
                        continue;
                    }
                    if index_in_new >= end_in_new {
                        break;
                    }

                    let length = index_in_new
                        .checked_sub(1)
                        .and_then(|prev| match_length_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_match_length_at.insert(index_in_new, length);

                    let displaces_whitespace = self.group_diffs
                        && best.size > 0
                        && length >= best.size
                        && self.whitespace.covers(best.start_in_old, best.size);

                    if length > best.size || displaces_whitespace {
                        best = MatchingBlock::new(
                            index_in_old + 1 - length,
                            index_in_new + 1 - length,
                            length,
                        );
                    }
                }
            }

            match_length_at = new_match_length_at;
        }

        if best.size == 0
            || (self.group_diffs && self.whitespace.covers(best.start_in_old, best.size))
        {
            return None;
        }
        Some(best)
    }

    /// All matching blocks over the full sequences, in order.
    pub fn matching_blocks(&mut self) -> Vec<MatchingBlock> {
        let mut blocks = Vec::new();
        let mut work = vec![Work::Range {
            start_in_old: 0,
            end_in_old: self.old.len(),
            start_in_new: 0,
            end_in_new: self.new.len(),
        }];

        while let Some(item) = work.pop() {
            let (start_in_old, end_in_old, start_in_new, end_in_new) = match item {
                Work::Emit(block) => {
                    blocks.push(block);
                    continue;
                }
                Work::Range {
                    start_in_old,
                    end_in_old,
                    start_in_new,
                    end_in_new,
                } => (start_in_old, end_in_old, start_in_new, end_in_new),
            };

            let Some(block) = self.find_match(start_in_old, end_in_old, start_in_new, end_in_new)
            else {
                continue;
            };
            tracing::trace!(
                old = block.start_in_old,
                new = block.start_in_new,
                size = block.size,
                "Matching block"
            );

            // Pushed in reverse: left range, then the block, then right range.
            if block.end_in_old() < end_in_old && block.end_in_new() < end_in_new {
                work.push(Work::Range {
                    start_in_old: block.end_in_old(),
                    end_in_old,
                    start_in_new: block.end_in_new(),
                    end_in_new,
                });
            }
            work.push(Work::Emit(block));
            if start_in_old < block.start_in_old && start_in_new < block.start_in_new {
                work.push(Work::Range {
                    start_in_old,
                    end_in_old: block.start_in_old,
                    start_in_new,
                    end_in_new: block.start_in_new,
                });
            }
        }

        blocks
    }
}

// ============================================================================
// Generic LCS
// ============================================================================

/// Longest common subsequence of `old` and `new` under `matcher`.
///
/// Returns matched pairs as 1-based `(old, new)` positions in increasing
/// order. The predicate is evaluated once per cell.
pub fn longest_common_subsequence<T, M>(old: &[T], new: &[T], matcher: &M) -> Vec<(usize, usize)>
where
    T: AsRef<str>,
    M: MatchStrategy + ?Sized,
{
    let (m, n) = (old.len(), new.len());
    let matches: Vec<Vec<bool>> = old
        .iter()
        .map(|a| new.iter().map(|b| matcher.is_match(a.as_ref(), b.as_ref())).collect())
        .collect();

    let mut lengths = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            lengths[i][j] = if matches[i - 1][j - 1] {
                lengths[i - 1][j - 1] + 1
            } else {
                lengths[i][j - 1].max(lengths[i - 1][j])
            };
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (m, n);
    loop {
        if i > 0 && j > 0 && matches[i - 1][j - 1] {
            pairs.push((i, j));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lengths[i][j - 1] >= lengths[i - 1][j]) {
            j -= 1;
        } else if i > 0 {
            i -= 1;
        } else {
            break;
        }
    }
    pairs.reverse();

    tracing::trace!(
        strategy = matcher.name(),
        matched = pairs.len(),
        "Computed longest common subsequence"
    );
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ExactMatch;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_single_block() {
        let old = tokens(&["a", " ", "b", " ", "c"]);
        let new = tokens(&["x", " ", "a", " ", "b", " ", "c"]);
        let mut aligner = BlockAligner::new(&old, &new, true);
        assert_eq!(aligner.matching_blocks(), [MatchingBlock::new(0, 2, 5)]);
    }

    #[test]
    fn test_blocks_are_ordered() {
        let old = tokens(&["a", "b", "X", "c", "d", "Y", "e"]);
        let new = tokens(&["a", "b", "c", "d", "e"]);
        let mut aligner = BlockAligner::new(&old, &new, true);
        let blocks = aligner.matching_blocks();
        assert_eq!(
            blocks,
            [
                MatchingBlock::new(0, 0, 2),
                MatchingBlock::new(3, 2, 2),
                MatchingBlock::new(6, 4, 1),
            ]
        );
    }

    #[test]
    fn test_tags_match_by_name() {
        let old = tokens(&["<p class=\"a\">", "x", "</p>"]);
        let new = tokens(&["<p>", "x", "</p>"]);
        let mut aligner = BlockAligner::new(&old, &new, true);
        assert_eq!(aligner.matching_blocks(), [MatchingBlock::new(0, 0, 3)]);
    }

    #[test]
    fn test_word_never_equals_tag() {
        let old = tokens(&["p"]);
        let new = tokens(&["<p>"]);
        let mut aligner = BlockAligner::new(&old, &new, true);
        assert!(aligner.matching_blocks().is_empty());
    }

    #[test]
    fn test_whitespace_only_match_rejected_when_grouping() {
        let old = tokens(&["a", " ", "b"]);
        let new = tokens(&["c", " ", "d"]);
        let mut grouped = BlockAligner::new(&old, &new, true);
        assert!(grouped.matching_blocks().is_empty());

        let mut ungrouped = BlockAligner::new(&old, &new, false);
        assert_eq!(ungrouped.matching_blocks(), [MatchingBlock::new(1, 1, 1)]);
    }

    #[test]
    fn test_whitespace_block_displaced_by_equal_length_word() {
        let old = tokens(&[" ", "a"]);
        let new = tokens(&["a", " "]);
        let mut aligner = BlockAligner::new(&old, &new, true);
        assert_eq!(aligner.find_match(0, 2, 0, 2), Some(MatchingBlock::new(1, 0, 1)));
    }

    #[test]
    fn test_empty_sequences() {
        let empty: Vec<String> = Vec::new();
        let new = tokens(&["a"]);
        assert!(BlockAligner::new(&empty, &new, true).matching_blocks().is_empty());
        assert!(BlockAligner::new(&new, &empty, true).matching_blocks().is_empty());
    }

    #[test]
    fn test_lcs_exact() {
        let old = ["A", "B", "C"];
        let new = ["A", "X", "C", "D"];
        assert_eq!(longest_common_subsequence(&old, &new, &ExactMatch), [(1, 1), (3, 3)]);
    }

    #[test]
    fn test_lcs_with_closure() {
        let old = ["apple", "BANANA"];
        let new = ["Apple", "banana", "cherry"];
        let ci = |a: &str, b: &str| a.eq_ignore_ascii_case(b);
        assert_eq!(longest_common_subsequence(&old, &new, &ci), [(1, 1), (2, 2)]);
    }

    #[test]
    fn test_lcs_empty() {
        let old: [&str; 0] = [];
        assert!(longest_common_subsequence(&old, &["a"], &ExactMatch).is_empty());
    }
}

//! Alignment results: matching blocks and edit operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

// ============================================================================
// Matching blocks
// ============================================================================

/// A run of `size` tokens equal in both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingBlock {
    pub start_in_old: usize,
    pub start_in_new: usize,
    pub size: usize,
}

impl MatchingBlock {
    #[must_use]
    pub const fn new(start_in_old: usize, start_in_new: usize, size: usize) -> Self {
        Self {
            start_in_old,
            start_in_new,
            size,
        }
    }

    #[must_use]
    pub const fn end_in_old(&self) -> usize {
        self.start_in_old + self.size
    }

    #[must_use]
    pub const fn end_in_new(&self) -> usize {
        self.start_in_new + self.size
    }
}

// ============================================================================
// Word operations
// ============================================================================

/// How a span of old tokens maps onto a span of new tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// One edit instruction over half-open token ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub start_in_old: usize,
    pub end_in_old: usize,
    pub start_in_new: usize,
    pub end_in_new: usize,
}

impl Operation {
    #[must_use]
    pub const fn new(
        kind: OperationKind,
        start_in_old: usize,
        end_in_old: usize,
        start_in_new: usize,
        end_in_new: usize,
    ) -> Self {
        Self {
            kind,
            start_in_old,
            end_in_old,
            start_in_new,
            end_in_new,
        }
    }

    #[must_use]
    pub const fn old_range(&self) -> Range<usize> {
        self.start_in_old..self.end_in_old
    }

    #[must_use]
    pub const fn new_range(&self) -> Range<usize> {
        self.start_in_new..self.end_in_new
    }
}

// ============================================================================
// List operations
// ============================================================================

/// Item-level change in a list diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOperationKind {
    Added,
    Deleted,
    Changed,
}

/// A list change over 1-based, inclusive line numbers.
///
/// For `Added` the old range is the single line the insertion follows (0 when
/// inserting at the top); `Deleted` mirrors that on the new side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOperation {
    pub kind: ListOperationKind,
    pub start_in_old: usize,
    pub end_in_old: usize,
    pub start_in_new: usize,
    pub end_in_new: usize,
}

impl ListOperation {
    #[must_use]
    pub const fn new(
        kind: ListOperationKind,
        start_in_old: usize,
        end_in_old: usize,
        start_in_new: usize,
        end_in_new: usize,
    ) -> Self {
        Self {
            kind,
            start_in_old,
            end_in_old,
            start_in_new,
            end_in_new,
        }
    }

    /// Number of old items this operation removes.
    #[must_use]
    pub const fn old_len(&self) -> usize {
        match self.kind {
            ListOperationKind::Added => 0,
            _ => self.end_in_old + 1 - self.start_in_old,
        }
    }

    /// Number of new items this operation adds.
    #[must_use]
    pub const fn new_len(&self) -> usize {
        match self.kind {
            ListOperationKind::Deleted => 0,
            _ => self.end_in_new + 1 - self.start_in_new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_ends() {
        let block = MatchingBlock::new(2, 5, 3);
        assert_eq!(block.end_in_old(), 5);
        assert_eq!(block.end_in_new(), 8);
    }

    #[test]
    fn test_operation_ranges() {
        let op = Operation::new(OperationKind::Replace, 1, 3, 1, 2);
        assert_eq!(op.old_range(), 1..3);
        assert_eq!(op.new_range().len(), 1);
        assert_eq!(op.kind.to_string(), "replace");
    }

    #[test]
    fn test_operation_serializes_lowercase_kind() {
        let op = Operation::new(OperationKind::Insert, 0, 0, 0, 2);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "insert");
    }

    #[test]
    fn test_list_operation_lengths() {
        let added = ListOperation::new(ListOperationKind::Added, 3, 3, 4, 5);
        assert_eq!((added.old_len(), added.new_len()), (0, 2));
        let changed = ListOperation::new(ListOperationKind::Changed, 2, 2, 2, 2);
        assert_eq!((changed.old_len(), changed.new_len()), (1, 1));
    }
}

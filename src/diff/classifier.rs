//! Matching blocks to edit operations.

use crate::model::{MatchingBlock, Operation, OperationKind};

/// Classify the gaps between matching blocks.
///
/// A zero-size sentinel at `(old_len, new_len)` closes the final gap. The
/// resulting operations partition both sequences in order.
#[must_use]
pub fn classify_operations(
    blocks: &[MatchingBlock],
    old_len: usize,
    new_len: usize,
) -> Vec<Operation> {
    let sentinel = MatchingBlock::new(old_len, new_len, 0);
    let mut operations = Vec::with_capacity(blocks.len() * 2 + 1);
    let mut position_in_old = 0;
    let mut position_in_new = 0;

    for block in blocks.iter().chain(std::iter::once(&sentinel)) {
        let at_old = position_in_old == block.start_in_old;
        let at_new = position_in_new == block.start_in_new;

        let kind = match (at_old, at_new) {
            (false, false) => Some(OperationKind::Replace),
            (true, false) => Some(OperationKind::Insert),
            (false, true) => Some(OperationKind::Delete),
            (true, true) => None,
        };
        if let Some(kind) = kind {
            operations.push(Operation::new(
                kind,
                position_in_old,
                block.start_in_old,
                position_in_new,
                block.start_in_new,
            ));
        }

        if block.size > 0 {
            operations.push(Operation::new(
                OperationKind::Equal,
                block.start_in_old,
                block.end_in_old(),
                block.start_in_new,
                block.end_in_new(),
            ));
        }

        position_in_old = block.end_in_old();
        position_in_new = block.end_in_new();
    }

    operations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(ops: &[Operation]) -> Vec<OperationKind> {
        ops.iter().map(|op| op.kind).collect()
    }

    #[test]
    fn test_identical_is_single_equal() {
        let ops = classify_operations(&[MatchingBlock::new(0, 0, 4)], 4, 4);
        assert_eq!(ops, [Operation::new(OperationKind::Equal, 0, 4, 0, 4)]);
    }

    #[test]
    fn test_gap_kinds() {
        // old: a X b c    new: a b Y c Z
        let blocks = [
            MatchingBlock::new(0, 0, 1),
            MatchingBlock::new(2, 1, 1),
            MatchingBlock::new(3, 3, 1),
        ];
        let ops = classify_operations(&blocks, 4, 5);
        assert_eq!(
            kinds(&ops),
            [
                OperationKind::Equal,
                OperationKind::Delete,
                OperationKind::Equal,
                OperationKind::Insert,
                OperationKind::Equal,
                OperationKind::Insert,
            ]
        );
        assert_eq!(ops[5], Operation::new(OperationKind::Insert, 4, 4, 4, 5));
    }

    #[test]
    fn test_no_blocks_is_replace() {
        let ops = classify_operations(&[], 2, 3);
        assert_eq!(ops, [Operation::new(OperationKind::Replace, 0, 2, 0, 3)]);
    }

    #[test]
    fn test_empty_inputs_produce_nothing() {
        assert!(classify_operations(&[], 0, 0).is_empty());
    }

    #[test]
    fn test_pure_insert_and_delete() {
        assert_eq!(
            kinds(&classify_operations(&[], 0, 2)),
            [OperationKind::Insert]
        );
        assert_eq!(
            kinds(&classify_operations(&[], 3, 0)),
            [OperationKind::Delete]
        );
    }
}

//! Backtracking an alignment table into edit operations

use super::align::AlignmentTable;
use super::binary::EditOperation;

/// Walk `table` from the full-length cell back to `(0, 0)` and return the edits
/// realising its minimal cost, ordered by position in the original.
///
/// `original` and `target` must be the sequences the table was computed from.
pub fn reconstruct(table: &AlignmentTable, original: &[u8], target: &[u8]) -> Vec<EditOperation> {
    debug_assert_eq!(table.original_len(), original.len());
    debug_assert_eq!(table.target_len(), target.len());

    let mut path = Vec::new();
    let (mut i, mut j) = (original.len(), target.len());

    while let Some((prev_i, prev_j)) = table.predecessor(i, j) {
        if prev_i + 1 == i && prev_j == j {
            path.push(EditOperation::Delete { at: prev_i });
        } else if prev_i == i && prev_j + 1 == j {
            path.push(EditOperation::Insert {
                at: i,
                value: target[prev_j],
            });
        } else if original[prev_i] != target[prev_j] {
            path.push(EditOperation::Replace {
                at: prev_i,
                value: target[prev_j],
            });
        }
        (i, j) = (prev_i, prev_j);
    }

    path.reverse();
    path
}

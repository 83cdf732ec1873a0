//! Errors reported by [`EditTree`](crate::EditTree) operations.
//!
//! Boundary errors are checked before the tree is touched, so a failing call
//! leaves the tree exactly as it was. Invariant errors only come out of
//! [`EditTree::validate`](crate::EditTree::validate) and indicate a bug in
//! the balancing code, never bad input.

use thiserror::Error;

/// Error returned by positional operations on an edit tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A single position fell outside the tree.
    #[error("position {pos} is out of range for a tree of size {len}")]
    OutOfRange { pos: usize, len: usize },

    /// A `pos..pos + length` range reached past the end of the tree.
    #[error("range of {length} starting at {pos} is out of range for a tree of size {len}")]
    RangeOutOfRange { pos: usize, length: usize, len: usize },

    /// The tree's cached node data disagrees with its shape.
    #[error("tree invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

/// A cached field that does not match what the subtree below it implies.
///
/// `pos` is the inorder position of the offending node in the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("node at {pos} has rank {rank} but {actual} nodes on its left")]
    RankMismatch { pos: usize, rank: usize, actual: usize },

    #[error("node at {pos} has size {size} but its subtree holds {actual} nodes")]
    SizeMismatch { pos: usize, size: usize, actual: usize },

    #[error("node at {pos} has height {height} but its subtree is {actual} tall")]
    HeightMismatch { pos: usize, height: i32, actual: i32 },

    #[error("node at {pos} caches balance {cached} but its children say {actual}")]
    BalanceMismatch {
        pos: usize,
        cached: crate::Balance,
        actual: crate::Balance,
    },

    #[error("node at {pos} has child heights {left} and {right}")]
    Unbalanced { pos: usize, left: i32, right: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_bounds() {
        let err = EditError::OutOfRange { pos: 7, len: 3 };
        assert_eq!(err.to_string(), "position 7 is out of range for a tree of size 3");

        let err = EditError::RangeOutOfRange { pos: 2, length: 5, len: 4 };
        assert_eq!(
            err.to_string(),
            "range of 5 starting at 2 is out of range for a tree of size 4"
        );
    }

    #[test]
    fn invariant_errors_convert() {
        let inner = InvariantError::Unbalanced { pos: 0, left: -1, right: 1 };
        let err: EditError = inner.clone().into();
        assert_eq!(err, EditError::Invariant(inner));
        assert!(err.to_string().starts_with("tree invariant violated"));
    }
}

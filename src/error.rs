//! Error types for red-black tree operations.

use thiserror::Error;

use crate::Key;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors reported by the tree.
///
/// `InvalidColor` is the only error a caller can trigger directly. The
/// remaining variants are produced by [`RbTree::validate`](crate::RbTree::validate)
/// when a structural invariant does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A raw colour value other than `0` (black) or `1` (red).
    #[error("invalid color {0}: expected 0 (black) or 1 (red)")]
    InvalidColor(u8),

    /// The root node is red.
    #[error("root {key} is red")]
    RedRoot {
        /// Key stored at the root.
        key: Key,
    },

    /// The shared sentinel has been recoloured.
    #[error("sentinel is red")]
    RedSentinel,

    /// A red node has a red child.
    #[error("red node {parent} has red child {child}")]
    RedRedViolation {
        /// Key of the red parent.
        parent: Key,
        /// Key of the red child.
        child: Key,
    },

    /// The two subtrees of a node disagree on black height.
    #[error("black height mismatch at {key}: left {left}, right {right}")]
    BlackHeightMismatch {
        /// Key of the node whose subtrees disagree.
        key: Key,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// The in-order walk produced a key smaller than its predecessor.
    #[error("keys out of order: {prev} precedes {next}")]
    OrderViolation {
        /// Earlier key in the walk.
        prev: Key,
        /// Later, smaller key.
        next: Key,
    },

    /// A child's parent link does not point back at its parent.
    #[error("node {key} has a stale parent link")]
    BrokenParentLink {
        /// Key of the child with the stale link.
        key: Key,
    },

    /// The number of reachable nodes differs from the tracked length.
    #[error("reachable node count {reachable} does not match len {len}")]
    CountMismatch {
        /// Nodes reachable from the root.
        reachable: usize,
        /// Length tracked by the tree.
        len: usize,
    },
}

//! # rbt-rs
//!
//! An arena-backed red-black tree over integer keys.
//!
//! All nodes live in a single `Vec` owned by the tree; parent and child links
//! are [`NodeId`] handles into that arena. Slot 0 holds the shared sentinel
//! ("nil"), which is permanently black and stands in for every missing child.
//! Duplicate keys are kept: an equal key descends right, so duplicates show up
//! next to each other in the in-order walk.
//!
//! ## Example
//!
//! ```rust
//! use rbt_rs::{Color, RbTree};
//!
//! let mut tree = RbTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(30);
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), 20);
//! assert_eq!(root.color(), Color::Black);
//! assert_eq!(tree.in_order_keys(), vec![10, 20, 30]);
//! assert!(tree.search(25).is_none());
//! ```

mod config;
mod error;
mod iter;
mod node;
mod tracing_helpers;
mod validate;

pub use config::TreeConfig;
pub use error::{TreeError, TreeResult};
pub use iter::{Iter, Keys};
pub use node::{Color, NodeId, NodeRef};

use node::Node;
use tracing_helpers::{debug_log, trace_log};

/// Key type stored in the tree.
pub type Key = i64;

/// Red-black tree with arena-allocated nodes.
///
/// - Single node arena; slot 0 is the sentinel
/// - Insert-only: nodes are never freed
/// - Iterative descent, fixup, and traversal (no recursion)
///
/// The tree has no internal synchronization. Share it across threads behind
/// a lock or keep it confined to one thread.
#[derive(Clone)]
pub struct RbTree {
    /// Node arena. `nodes[0]` is the sentinel and is never written after
    /// construction.
    nodes: Vec<Node>,
    root: NodeId,
}

impl RbTree {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TreeConfig::default().initial_capacity(capacity))
    }

    pub fn with_config(config: TreeConfig) -> Self {
        debug_log!(capacity = config.initial_capacity, "creating red-black tree");
        let mut nodes = Vec::with_capacity(config.initial_capacity.saturating_add(1));
        nodes.push(Node::SENTINEL);
        Self {
            nodes,
            root: NodeId::NIL,
        }
    }

    /// Number of keys stored, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// The root node, or `None` when the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        (!self.root.is_nil()).then(|| NodeRef::new(self, self.root))
    }

    /// View of the shared sentinel.
    pub fn sentinel(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::NIL)
    }

    /// Look up a handle previously obtained from this tree.
    ///
    /// Returns `None` for the sentinel and for handles outside the arena.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (!id.is_nil() && id.index() < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    #[inline]
    pub(crate) fn slot(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Node {
        debug_assert!(!id.is_nil(), "sentinel must not be written");
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn root_id(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub(crate) fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.slot(id).parent
    }

    #[inline]
    fn left(&self, id: NodeId) -> NodeId {
        self.slot(id).left
    }

    #[inline]
    fn right(&self, id: NodeId) -> NodeId {
        self.slot(id).right
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.slot(id).color
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.slot_mut(id).color = color;
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

// =============================================================================
// Search and inspection
// =============================================================================

impl RbTree {
    fn search_id(&self, key: Key) -> NodeId {
        let mut current = self.root;
        while !current.is_nil() {
            let node = self.slot(current);
            if key == node.key {
                return current;
            }
            current = if key < node.key { node.left } else { node.right };
        }
        NodeId::NIL
    }

    /// Find a node holding `key`.
    ///
    /// With duplicates present this returns the first match met on the way
    /// down; the others are only reachable through [`RbTree::iter`].
    pub fn search(&self, key: Key) -> Option<NodeRef<'_>> {
        self.node(self.search_id(key))
    }

    pub fn contains(&self, key: Key) -> bool {
        !self.search_id(key).is_nil()
    }

    pub fn min(&self) -> Option<Key> {
        let mut current = self.root;
        if current.is_nil() {
            return None;
        }
        while !self.left(current).is_nil() {
            current = self.left(current);
        }
        Some(self.slot(current).key)
    }

    pub fn max(&self) -> Option<Key> {
        let mut current = self.root;
        if current.is_nil() {
            return None;
        }
        while !self.right(current).is_nil() {
            current = self.right(current);
        }
        Some(self.slot(current).key)
    }

    /// Number of nodes on the longest root-to-sentinel path (0 when empty).
    pub fn height(&self) -> usize {
        let mut max = 0usize;
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        if !self.root.is_nil() {
            stack.push((self.root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = self.slot(id);
            for child in [node.left, node.right] {
                if !child.is_nil() {
                    stack.push((child, depth + 1));
                }
            }
        }
        max
    }

    /// Black nodes on the leftmost root-to-sentinel path, sentinel excluded.
    ///
    /// Every path agrees on this count while the tree is valid.
    pub fn black_height(&self) -> usize {
        let mut count = 0usize;
        let mut current = self.root;
        while !current.is_nil() {
            if self.color(current).is_black() {
                count += 1;
            }
            current = self.left(current);
        }
        count
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// All keys in ascending order, duplicates included.
    pub fn in_order_keys(&self) -> Vec<Key> {
        self.keys().collect()
    }

    /// Check every red-black and search-tree invariant.
    ///
    /// Returns the first violation found. A tree built only through
    /// [`RbTree::insert`] always validates.
    pub fn validate(&self) -> TreeResult<()> {
        validate::validate(self)
    }
}

// =============================================================================
// Insertion
// =============================================================================

impl RbTree {
    /// Insert `key`. Equal keys are kept and routed to the right.
    pub fn insert(&mut self, key: Key) {
        let id = self.alloc(Node::red(key));

        // Descend to the attachment point, remembering the last real node.
        let mut parent = NodeId::NIL;
        let mut current = self.root;
        while !current.is_nil() {
            parent = current;
            current = if key < self.slot(current).key {
                self.left(current)
            } else {
                self.right(current)
            };
        }

        self.slot_mut(id).parent = parent;
        if parent.is_nil() {
            self.root = id;
            self.set_color(id, Color::Black);
            trace_log!(key, "inserted root");
            return;
        }
        if key < self.slot(parent).key {
            self.slot_mut(parent).left = id;
        } else {
            self.slot_mut(parent).right = id;
        }

        // A red child of a black root cannot violate anything.
        if self.parent(parent).is_nil() {
            return;
        }

        self.fix_insert(id);
    }

    /// Restore the red-black properties after attaching the red node `node`.
    fn fix_insert(&mut self, mut node: NodeId) {
        loop {
            let parent = self.parent(node);
            if parent.is_nil() || self.color(parent).is_black() {
                break;
            }
            let grandparent = self.parent(parent);
            if grandparent.is_nil() {
                break;
            }

            if parent == self.right(grandparent) {
                let uncle = self.left(grandparent);
                if self.color(uncle).is_red() {
                    trace_log!(key = self.slot(node).key, "fixup: red uncle (left), recolor");
                    self.set_color(uncle, Color::Black);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        trace_log!(key = self.slot(node).key, "fixup: inner right-left, straighten");
                        node = parent;
                        self.rotate_right(node);
                    }
                    trace_log!(key = self.slot(node).key, "fixup: outer right-right, rotate");
                    let parent = self.parent(node);
                    self.set_color(parent, Color::Black);
                    let grandparent = self.parent(parent);
                    if !grandparent.is_nil() {
                        self.set_color(grandparent, Color::Red);
                        self.rotate_left(grandparent);
                    }
                }
            } else {
                let uncle = self.right(grandparent);
                if self.color(uncle).is_red() {
                    trace_log!(key = self.slot(node).key, "fixup: red uncle (right), recolor");
                    self.set_color(uncle, Color::Black);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        trace_log!(key = self.slot(node).key, "fixup: inner left-right, straighten");
                        node = parent;
                        self.rotate_left(node);
                    }
                    trace_log!(key = self.slot(node).key, "fixup: outer left-left, rotate");
                    let parent = self.parent(node);
                    self.set_color(parent, Color::Black);
                    let grandparent = self.parent(parent);
                    if !grandparent.is_nil() {
                        self.set_color(grandparent, Color::Red);
                        self.rotate_right(grandparent);
                    }
                }
            }

            if node == self.root {
                break;
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // =========================================================================
    // Rotations
    // =========================================================================

    /// Promote `x.right` into `x`'s position; `x` becomes its left child.
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert!(!y.is_nil(), "rotate_left needs a right child");
        trace_log!(pivot = self.slot(x).key, "rotate left");

        let moved = self.left(y);
        self.slot_mut(x).right = moved;
        if !moved.is_nil() {
            self.slot_mut(moved).parent = x;
        }

        let x_parent = self.parent(x);
        self.slot_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.slot_mut(y).left = x;
        self.slot_mut(x).parent = y;
    }

    /// Promote `x.left` into `x`'s position; `x` becomes its right child.
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert!(!y.is_nil(), "rotate_right needs a left child");
        trace_log!(pivot = self.slot(x).key, "rotate right");

        let moved = self.right(y);
        self.slot_mut(x).left = moved;
        if !moved.is_nil() {
            self.slot_mut(moved).parent = x;
        }

        let x_parent = self.parent(x);
        self.slot_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.slot_mut(y).right = x;
        self.slot_mut(x).parent = y;
    }

    /// Point whichever slot of `parent` held `old` at `new`, or the root if
    /// `parent` is nil.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.left(parent) == old {
            self.slot_mut(parent).left = new;
        } else {
            self.slot_mut(parent).right = new;
        }
    }
}

impl Default for RbTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RbTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl Extend<Key> for RbTree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for RbTree {
    fn from_iter<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(keys);
        tree
    }
}


#[cfg(test)]
mod proptests;

//! Arena nodes, colours, and the read-only node view.

use std::fmt;

use crate::error::TreeError;
use crate::{Key, RbTree};

// =============================================================================
// Color
// =============================================================================

/// Red-black colour bit.
///
/// The raw `u8` encoding is `0` for black and `1` for red. Converting any
/// other raw value fails before anything is stored:
///
/// ```rust
/// use rbt_rs::{Color, TreeError};
///
/// assert_eq!(Color::try_from(1u8), Ok(Color::Red));
/// assert_eq!(Color::try_from(7u8), Err(TreeError::InvalidColor(7)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
}

impl Color {
    #[inline]
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl TryFrom<u8> for Color {
    type Error = TreeError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Color::Black),
            1 => Ok(Color::Red),
            other => Err(TreeError::InvalidColor(other)),
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("BLACK"),
            Color::Red => f.write_str("RED"),
        }
    }
}

// =============================================================================
// Handles
// =============================================================================

/// Handle into a tree's node arena.
///
/// Index 0 is reserved for the shared sentinel, so "is this the sentinel"
/// is a plain equality check against [`NodeId::NIL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const NIL: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx <= u32::MAX as usize);
        Self(idx as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

// =============================================================================
// Arena slot
// =============================================================================

/// One arena slot. `parent == NIL` means "no parent"; `left`/`right == NIL`
/// means "no child".
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Node {
    pub(crate) const SENTINEL: Node = Node {
        key: 0,
        color: Color::Black,
        parent: NodeId::NIL,
        left: NodeId::NIL,
        right: NodeId::NIL,
    };

    /// Fresh node as created by insertion: red, both children the sentinel.
    #[inline]
    pub(crate) fn red(key: Key) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

// =============================================================================
// Read-only view
// =============================================================================

/// Borrowed, read-only view of a node inside an [`RbTree`].
///
/// Relations are exposed as `Option`: a missing parent and a sentinel child
/// both come back as `None`. The only way to obtain a view of the sentinel
/// itself is [`RbTree::sentinel`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a RbTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub(crate) fn new(tree: &'a RbTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn slot(&self) -> &'a Node {
        self.tree.slot(self.id)
    }

    #[inline]
    fn relative(&self, id: NodeId) -> Option<NodeRef<'a>> {
        (!id.is_nil()).then(|| NodeRef::new(self.tree, id))
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Stored key. Meaningless for the sentinel.
    #[inline]
    pub fn key(&self) -> Key {
        self.slot().key
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.slot().color
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.id.is_nil()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        if self.is_nil() {
            return None;
        }
        self.relative(self.slot().parent)
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.relative(self.slot().left)
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.relative(self.slot().right)
    }

    pub fn grandparent(&self) -> Option<NodeRef<'a>> {
        self.parent()?.parent()
    }

    /// The other child of this node's parent.
    pub fn sibling(&self) -> Option<NodeRef<'a>> {
        let parent = self.parent()?;
        let p = parent.slot();
        if p.left == self.id {
            self.relative(p.right)
        } else {
            self.relative(p.left)
        }
    }

    /// The sibling of this node's parent.
    pub fn uncle(&self) -> Option<NodeRef<'a>> {
        self.parent()?.sibling()
    }

    /// True when both child slots hold the sentinel.
    pub fn is_leaf(&self) -> bool {
        let n = self.slot();
        n.left.is_nil() && n.right.is_nil()
    }

    pub fn has_two_children(&self) -> bool {
        let n = self.slot();
        !n.left.is_nil() && !n.right.is_nil()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            return f.write_str("NodeRef(nil)");
        }
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("color", &self.color())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            return f.write_str("nil (BLACK)");
        }
        write!(f, "{} ({})", self.key(), self.color())
    }
}

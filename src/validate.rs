//! Structural invariant checks.
//!
//! Walks the whole tree once and reports the first broken property:
//! sentinel colour, root colour, parent back-links, red-red adjacency,
//! black-height agreement, node count, and in-order key order.

use crate::error::{TreeError, TreeResult};
use crate::node::NodeId;
use crate::RbTree;

pub(crate) fn validate(tree: &RbTree) -> TreeResult<()> {
    if tree.slot(NodeId::NIL).color.is_red() {
        return Err(TreeError::RedSentinel);
    }

    let root = tree.root_id();
    if root.is_nil() {
        return check_count(0, tree.len());
    }

    let root_node = tree.slot(root);
    if root_node.color.is_red() {
        return Err(TreeError::RedRoot { key: root_node.key });
    }
    if !root_node.parent.is_nil() {
        return Err(TreeError::BrokenParentLink { key: root_node.key });
    }

    // Black heights exclude the sentinel; indexed by arena slot.
    let mut black_height = vec![0usize; tree.arena_len()];
    let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];
    let mut reachable = 0usize;

    while let Some((id, expanded)) = stack.pop() {
        let node = tree.slot(id);

        if !expanded {
            reachable += 1;
            if reachable > tree.len() {
                // Also stops a cycle from spinning forever.
                return check_count(reachable, tree.len());
            }
            stack.push((id, true));
            for child_id in [node.left, node.right] {
                if child_id.is_nil() {
                    continue;
                }
                let child = tree.slot(child_id);
                if child.parent != id {
                    return Err(TreeError::BrokenParentLink { key: child.key });
                }
                if node.color.is_red() && child.color.is_red() {
                    return Err(TreeError::RedRedViolation {
                        parent: node.key,
                        child: child.key,
                    });
                }
                stack.push((child_id, false));
            }
            continue;
        }

        let left = black_height[node.left.index()];
        let right = black_height[node.right.index()];
        if left != right {
            return Err(TreeError::BlackHeightMismatch {
                key: node.key,
                left,
                right,
            });
        }
        black_height[id.index()] = left + usize::from(node.color.is_black());
    }

    check_count(reachable, tree.len())?;

    let mut keys = tree.keys();
    if let Some(mut prev) = keys.next() {
        for next in keys {
            if next < prev {
                return Err(TreeError::OrderViolation { prev, next });
            }
            prev = next;
        }
    }

    Ok(())
}

fn check_count(reachable: usize, len: usize) -> TreeResult<()> {
    if reachable == len {
        Ok(())
    } else {
        Err(TreeError::CountMismatch { reachable, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Color;

    fn sample() -> RbTree {
        let mut t = RbTree::new();
        for k in [50, 20, 80, 10, 30, 70, 90, 25] {
            t.insert(k);
        }
        t
    }

    #[test]
    fn test_valid_trees() {
        assert_eq!(RbTree::new().validate(), Ok(()));
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_red_root_detected() {
        let mut t = sample();
        let root = t.root_id();
        t.slot_mut(root).color = Color::Red;
        assert_eq!(t.validate(), Err(TreeError::RedRoot { key: 50 }));
    }

    #[test]
    fn test_red_red_detected() {
        let mut t = sample();
        // 25 is red under 30; force 30 red as well.
        let thirty = t.search(30).unwrap().id();
        let twenty_five = t.search(25).unwrap();
        assert!(twenty_five.is_red());
        t.slot_mut(thirty).color = Color::Red;
        assert!(matches!(
            t.validate(),
            Err(TreeError::RedRedViolation { .. }) | Err(TreeError::BlackHeightMismatch { .. })
        ));
    }

    #[test]
    fn test_black_height_mismatch_detected() {
        let mut t = sample();
        // 70 is red under 80; turning it black leaves 80 lopsided.
        let seventy = t.search(70).unwrap().id();
        t.slot_mut(seventy).color = Color::Black;
        assert!(matches!(
            t.validate(),
            Err(TreeError::BlackHeightMismatch { key: 80, .. })
        ));
    }

    #[test]
    fn test_order_violation_detected() {
        let mut t = sample();
        let ten = t.search(10).unwrap().id();
        t.slot_mut(ten).key = 95;
        assert!(matches!(
            t.validate(),
            Err(TreeError::OrderViolation { .. })
        ));
    }

    #[test]
    fn test_broken_parent_link_detected() {
        let mut t = sample();
        let ten = t.search(10).unwrap().id();
        t.slot_mut(ten).parent = NodeId::NIL;
        assert_eq!(t.validate(), Err(TreeError::BrokenParentLink { key: 10 }));
    }
}

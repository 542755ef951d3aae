use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

/// Walk the arena directly and check the red-black properties without going
/// through `validate`, so the two checks keep each other honest.
fn validate_tree(t: &RbTree) {
    assert!(t.slot(NodeId::NIL).color.is_black(), "sentinel must stay black");
    assert!(t.slot(NodeId::NIL).left.is_nil() && t.slot(NodeId::NIL).right.is_nil());

    if t.root.is_nil() {
        assert_eq!(t.len(), 0);
        return;
    }
    assert!(t.color(t.root).is_black(), "root must be black");
    assert!(t.parent(t.root).is_nil(), "root must have no parent");

    // (node, black nodes above it, inclusive)
    let mut stack: Vec<(NodeId, usize)> = vec![(t.root, 1)];
    let mut leaf_black_heights: Vec<usize> = Vec::new();
    let mut reachable = 0usize;

    while let Some((id, blacks)) = stack.pop() {
        reachable += 1;
        let node = *t.slot(id);
        for child in [node.left, node.right] {
            if child.is_nil() {
                leaf_black_heights.push(blacks);
                continue;
            }
            assert_eq!(t.parent(child), id, "child must point back at parent");
            if node.color.is_red() {
                assert!(t.color(child).is_black(), "red node {} has red child", node.key);
            }
            let child_blacks = blacks + usize::from(t.color(child).is_black());
            stack.push((child, child_blacks));
        }
    }

    assert_eq!(reachable, t.len(), "reachable nodes must match len");
    assert!(
        leaf_black_heights.windows(2).all(|w| w[0] == w[1]),
        "black height differs across paths"
    );
}

fn height_bound(n: usize) -> f64 {
    2.0 * ((n + 1) as f64).log2()
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(#[proptest(strategy = "-64i64..64")] i64),
    Search(#[proptest(strategy = "-80i64..80")] i64),
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_invariants_hold_after_every_insert(keys in prop::collection::vec(any::<i64>(), 0..=300)) {
        let mut t = RbTree::new();
        for (i, &k) in keys.iter().enumerate() {
            t.insert(k);
            validate_tree(&t);
            prop_assert_eq!(t.validate(), Ok(()));
            prop_assert!((t.height() as f64) <= height_bound(i + 1));
        }
    }

    #[test]
    fn prop_in_order_is_sorted_multiset(keys in prop::collection::vec(-50i64..50, 0..=500)) {
        let t: RbTree = keys.iter().copied().collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        prop_assert_eq!(t.in_order_keys(), expected);
        prop_assert_eq!(t.len(), keys.len());
    }

    #[test]
    fn prop_search_matches_model(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t = RbTree::new();
        let mut m: BTreeMap<i64, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    t.insert(k);
                    *m.entry(k).or_default() += 1;
                }
                Op::Search(k) => {
                    let found = t.search(k).map(|n| n.key());
                    let expected = m.contains_key(&k).then_some(k);
                    prop_assert_eq!(found, expected);
                }
            }
            prop_assert_eq!(t.len(), m.values().sum::<usize>());
        }

        validate_tree(&t);
        prop_assert_eq!(t.min(), m.keys().next().copied());
        prop_assert_eq!(t.max(), m.keys().next_back().copied());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<Key> = vec![1, 2, 3, 4, 5, 6, 7];

    for_each_permutation(&keys, |perm| {
        let mut t = RbTree::new();
        for k in perm {
            t.insert(k);
            validate_tree(&t);
        }
        assert_eq!(t.in_order_keys(), keys);
        assert!(t.height() <= 4);
    });
}

#[test]
fn exhaustive_insert_order_with_duplicates() {
    let keys: Vec<Key> = vec![2, 2, 1, 3, 3, 3];

    for_each_permutation(&keys, |perm| {
        let t: RbTree = perm.into_iter().collect();
        validate_tree(&t);
        assert_eq!(t.in_order_keys(), vec![1, 2, 2, 3, 3, 3]);
        for k in [1, 2, 3] {
            assert_eq!(t.search(k).map(|n| n.key()), Some(k));
        }
        assert!(t.search(0).is_none());
        assert!(t.search(4).is_none());
    });
}

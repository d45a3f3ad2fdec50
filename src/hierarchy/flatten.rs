//! Flattening and renumbering of the subject hierarchy.
//!
//! The ordering model is a single section-wide sequence: walking the tree
//! depth-first (each top-level subject immediately followed by its children)
//! yields the flat list, and `order` is the 1-based position in that list.
//! Children are not renumbered per branch; the sequence is global.

use super::tree::{SubjectNode, build_tree, orphaned_children};
use crate::types::SubjectItem;

/// Flattens tree nodes into the display sequence.
///
/// Each top-level subject is appended, then its children in their current
/// order, then the next subject. `order` values are carried through
/// unchanged; callers renumber separately.
pub fn flatten(nodes: &[SubjectNode]) -> Vec<SubjectItem> {
    let mut flat = Vec::with_capacity(nodes.iter().map(SubjectNode::len).sum());
    for node in nodes {
        flat.push(node.subject.clone());
        flat.extend(node.children.iter().cloned());
    }
    flat
}

/// Rewrites `order` to the 1-based position in the sequence.
///
/// Idempotent: renumbering an already renumbered list changes nothing.
pub fn assign_sequential_order(mut items: Vec<SubjectItem>) -> Vec<SubjectItem> {
    for (index, item) in items.iter_mut().enumerate() {
        item.order = index as u32 + 1;
    }
    items
}

/// Rewrites `order` to the 1-based position within each sibling group.
///
/// Top-level subjects form one group; each parent's children form another.
/// Used by the same-level move policy, where every group keeps its own
/// contiguous sequence.
pub fn renumber_sibling_groups(mut items: Vec<SubjectItem>) -> Vec<SubjectItem> {
    let parents: Vec<Option<crate::types::SubjectId>> =
        items.iter().map(|item| item.parent_id).collect();
    for (index, item) in items.iter_mut().enumerate() {
        let position = parents[..index]
            .iter()
            .filter(|parent| **parent == item.parent_id)
            .count();
        item.order = position as u32 + 1;
    }
    items
}

/// Rebuilds the canonical depth-first sequence from an arbitrary item list.
///
/// Cross-level moves can leave the stored sequence diverged from the
/// tree-derived one; every reorder operation starts from this
/// canonicalization so the result is deterministic. Children whose parent is
/// absent from the list are appended at the tail in their existing relative
/// order rather than dropped.
pub fn canonical_sequence(items: &[SubjectItem]) -> Vec<SubjectItem> {
    let mut sequence = flatten(&build_tree(items));
    sequence.extend(orphaned_children(items));
    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[SubjectItem]) -> Vec<u64> {
        items.iter().map(|item| item.id.0).collect()
    }

    fn orders(items: &[SubjectItem]) -> Vec<u32> {
        items.iter().map(|item| item.order).collect()
    }

    #[test]
    fn flatten_walks_each_subject_then_its_children() {
        let items = vec![
            SubjectItem::root(1u64, 1),
            SubjectItem::child(11u64, 1u64, 2),
            SubjectItem::root(2u64, 3),
            SubjectItem::child(21u64, 2u64, 4),
            SubjectItem::child(22u64, 2u64, 5),
        ];

        let flat = flatten(&build_tree(&items));

        assert_eq!(ids(&flat), vec![1, 11, 2, 21, 22]);
    }

    #[test]
    fn assign_sequential_order_numbers_from_one() {
        let items = vec![
            SubjectItem::root(5u64, 40),
            SubjectItem::root(6u64, 2),
            SubjectItem::root(7u64, 19),
        ];

        let renumbered = assign_sequential_order(items);

        assert_eq!(orders(&renumbered), vec![1, 2, 3]);
    }

    #[test]
    fn canonical_sequence_restores_depth_first_order() {
        // A cross-level move left a child positioned before its parent in
        // the stored sequence; canonicalization snaps it back under the
        // parent without losing any row.
        let items = vec![
            SubjectItem::child(11u64, 1u64, 1),
            SubjectItem::root(1u64, 2),
            SubjectItem::root(2u64, 3),
        ];

        let sequence = canonical_sequence(&items);

        assert_eq!(ids(&sequence), vec![1, 11, 2]);
    }

    #[test]
    fn canonical_sequence_keeps_orphans_at_tail() {
        let items = vec![
            SubjectItem::child(31u64, 3u64, 1),
            SubjectItem::root(1u64, 2),
            SubjectItem::child(32u64, 3u64, 3),
        ];

        let sequence = canonical_sequence(&items);

        assert_eq!(ids(&sequence), vec![1, 31, 32]);
    }

    #[test]
    fn renumber_sibling_groups_gives_each_group_its_own_sequence() {
        let items = vec![
            SubjectItem::root(1u64, 9),
            SubjectItem::child(11u64, 1u64, 9),
            SubjectItem::child(12u64, 1u64, 9),
            SubjectItem::root(2u64, 9),
            SubjectItem::child(21u64, 2u64, 9),
        ];

        let renumbered = renumber_sibling_groups(items);

        assert_eq!(orders(&renumbered), vec![1, 1, 2, 2, 1]);
    }

    #[test]
    fn empty_input_flattens_to_empty() {
        assert!(flatten(&[]).is_empty());
        assert!(assign_sequential_order(Vec::new()).is_empty());
        assert!(canonical_sequence(&[]).is_empty());
    }

    mod properties {
        use super::*;
        use crate::test_utils::{arb_section_items, arb_shuffled_section_items};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn assign_sequential_order_is_idempotent(items in arb_section_items()) {
                let once = assign_sequential_order(items);
                let twice = assign_sequential_order(once.clone());
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn assigned_orders_are_contiguous_from_one(items in arb_section_items()) {
                let renumbered = assign_sequential_order(items);
                for (index, item) in renumbered.iter().enumerate() {
                    prop_assert_eq!(item.order, index as u32 + 1);
                }
            }

            #[test]
            fn canonical_sequence_is_idempotent(items in arb_shuffled_section_items()) {
                let once = canonical_sequence(&items);
                let twice = canonical_sequence(&once);
                prop_assert_eq!(ids(&once), ids(&twice));
            }

            #[test]
            fn canonical_sequence_loses_no_items(items in arb_shuffled_section_items()) {
                let sequence = canonical_sequence(&items);
                prop_assert_eq!(sequence.len(), items.len());

                let mut before: Vec<u64> = items.iter().map(|i| i.id.0).collect();
                let mut after: Vec<u64> = sequence.iter().map(|i| i.id.0).collect();
                before.sort_unstable();
                after.sort_unstable();
                prop_assert_eq!(before, after);
            }

            #[test]
            fn children_follow_their_parent_in_canonical_order(items in arb_section_items()) {
                let sequence = canonical_sequence(&items);
                for (index, item) in sequence.iter().enumerate() {
                    if let Some(parent) = item.parent_id {
                        let parent_index = sequence
                            .iter()
                            .position(|candidate| candidate.id == parent);
                        if let Some(parent_index) = parent_index {
                            prop_assert!(parent_index < index);
                        }
                    }
                }
            }

            #[test]
            fn sibling_group_orders_are_contiguous(items in arb_section_items()) {
                let renumbered = renumber_sibling_groups(items);
                let tree = build_tree(&renumbered);
                for node in &tree {
                    for (index, child) in node.children.iter().enumerate() {
                        prop_assert_eq!(child.order, index as u32 + 1);
                    }
                }
                let roots: Vec<&SubjectItem> =
                    renumbered.iter().filter(|i| i.is_root()).collect();
                for (index, root) in roots.iter().enumerate() {
                    prop_assert_eq!(root.order, index as u32 + 1);
                }
            }
        }
    }
}

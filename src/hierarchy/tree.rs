//! Tree derivation over the flat item list.
//!
//! Pure functions for grouping a section's flat subject list into the
//! two-level structure the UI renders. The derived tree is a view; it is
//! rebuilt from the flat list on demand and never stored.

use std::collections::HashSet;

use crate::types::{SubjectId, SubjectItem};

/// A top-level subject together with its child topics, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectNode {
    /// The top-level subject itself.
    pub subject: SubjectItem,

    /// Child topics in their current sequence order.
    pub children: Vec<SubjectItem>,
}

impl SubjectNode {
    /// Creates a node with no children.
    pub fn leaf(subject: SubjectItem) -> Self {
        SubjectNode {
            subject,
            children: Vec::new(),
        }
    }

    /// Returns the number of items in this node including the subject itself.
    pub fn len(&self) -> usize {
        1 + self.children.len()
    }

    /// Returns false always; a node contains at least its subject.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Groups the flat list into top-level subjects with their children.
///
/// Roots appear in their flat-list order; each root's children appear in
/// their flat-list order. Children whose parent id is not present in the
/// list are not part of any node (the flat list remains their home; see
/// [`orphaned_children`]).
pub fn build_tree(items: &[SubjectItem]) -> Vec<SubjectNode> {
    items
        .iter()
        .filter(|item| item.is_root())
        .map(|root| SubjectNode {
            subject: root.clone(),
            children: items
                .iter()
                .filter(|item| item.parent_id == Some(root.id))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Returns the children whose parent id does not appear in the list.
///
/// These rows are invisible in the derived tree but must never be dropped
/// from the flat sequence by an engine operation.
pub fn orphaned_children(items: &[SubjectItem]) -> Vec<SubjectItem> {
    let present: HashSet<SubjectId> = items.iter().map(|item| item.id).collect();
    items
        .iter()
        .filter(|item| {
            item.parent_id
                .is_some_and(|parent| !present.contains(&parent))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_items() -> Vec<SubjectItem> {
        vec![
            SubjectItem::root(1u64, 1),
            SubjectItem::child(11u64, 1u64, 2),
            SubjectItem::child(12u64, 1u64, 3),
            SubjectItem::root(2u64, 4),
            SubjectItem::child(21u64, 2u64, 5),
        ]
    }

    #[test]
    fn groups_children_under_their_parents() {
        let tree = build_tree(&make_items());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].subject.id, SubjectId(1));
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].id, SubjectId(11));
        assert_eq!(tree[0].children[1].id, SubjectId(12));
        assert_eq!(tree[1].subject.id, SubjectId(2));
        assert_eq!(tree[1].children.len(), 1);
    }

    #[test]
    fn preserves_flat_list_order_within_groups() {
        // Children listed out of positional order in the flat list keep
        // that flat-list order in the derived tree.
        let items = vec![
            SubjectItem::root(1u64, 1),
            SubjectItem::child(12u64, 1u64, 3),
            SubjectItem::child(11u64, 1u64, 2),
        ];

        let tree = build_tree(&items);

        assert_eq!(tree[0].children[0].id, SubjectId(12));
        assert_eq!(tree[0].children[1].id, SubjectId(11));
    }

    #[test]
    fn orphaned_children_are_absent_from_tree() {
        let mut items = make_items();
        items.retain(|item| item.id != SubjectId(2));

        let tree = build_tree(&items);
        let orphans = orphaned_children(&items);

        assert_eq!(tree.len(), 1);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, SubjectId(21));
    }

    #[test]
    fn empty_list_produces_empty_tree() {
        assert!(build_tree(&[]).is_empty());
        assert!(orphaned_children(&[]).is_empty());
    }
}

//! Subject list items.
//!
//! An item is one row of a class section's curriculum list. The hierarchy is
//! at most two levels deep: top-level subjects and their child topics. The
//! flat list of items is the source of truth; tree views are derived from it
//! on demand.

use serde::{Deserialize, Serialize};

use super::ids::SubjectId;

/// One row of the section's subject list.
///
/// `order` is the item's position in the section-wide display sequence
/// (1-based). Items never move between sections; the engine only ever
/// rewrites `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectItem {
    /// Stable identifier assigned by the backing store.
    pub id: SubjectId,

    /// The parent subject for child topics, `None` for top-level subjects.
    pub parent_id: Option<SubjectId>,

    /// 1-based position in the display sequence.
    pub order: u32,
}

impl SubjectItem {
    /// Creates an item with an explicit parent.
    pub fn new(id: SubjectId, parent_id: Option<SubjectId>, order: u32) -> Self {
        SubjectItem {
            id,
            parent_id,
            order,
        }
    }

    /// Creates a top-level subject.
    pub fn root(id: impl Into<SubjectId>, order: u32) -> Self {
        SubjectItem {
            id: id.into(),
            parent_id: None,
            order,
        }
    }

    /// Creates a child topic under the given parent.
    pub fn child(id: impl Into<SubjectId>, parent: impl Into<SubjectId>, order: u32) -> Self {
        SubjectItem {
            id: id.into(),
            parent_id: Some(parent.into()),
            order,
        }
    }

    /// Returns true if this is a top-level subject.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_parent() {
        let item = SubjectItem::root(7u64, 1);
        assert!(item.is_root());
        assert_eq!(item.parent_id, None);
    }

    #[test]
    fn child_records_parent() {
        let item = SubjectItem::child(8u64, 7u64, 2);
        assert!(!item.is_root());
        assert_eq!(item.parent_id, Some(SubjectId(7)));
    }

    #[test]
    fn serde_roundtrip_preserves_fields() {
        let item = SubjectItem::child(8u64, 7u64, 3);
        let json = serde_json::to_string(&item).unwrap();
        let parsed: SubjectItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }

    #[test]
    fn parent_id_serializes_as_null_for_roots() {
        let item = SubjectItem::root(7u64, 1);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"parent_id\":null"));
    }
}

//! Reorder batch payloads.
//!
//! A batch is the unit handed to the persistence gateway: the full proposed
//! ordering of the section, not a delta. Sending the complete ordering keeps
//! the gateway contract idempotent; resubmitting the same batch yields the
//! same stored state.

use serde::{Deserialize, Serialize};

use super::ids::SubjectId;
use super::item::SubjectItem;

/// One `(id, order)` pair within a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment {
    pub id: SubjectId,
    pub order: u32,
}

/// The full proposed ordering of a section's subject list.
///
/// Entries appear in display-sequence order. The batch carries every item,
/// including ones whose `order` did not change in the triggering gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderBatch {
    pub entries: Vec<OrderAssignment>,
}

impl ReorderBatch {
    /// Builds a batch from the current item sequence.
    pub fn from_items(items: &[SubjectItem]) -> Self {
        ReorderBatch {
            entries: items
                .iter()
                .map(|item| OrderAssignment {
                    id: item.id,
                    order: item.order,
                })
                .collect(),
        }
    }

    /// Returns the number of entries in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the batch carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the proposed order for the given item, if present.
    pub fn order_of(&self, id: SubjectId) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.order)
    }
}

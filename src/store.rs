//! Optimistic ordering state for one section.
//!
//! The store owns two copies of the subject list: `local`, the order the UI
//! shows right now, and `confirmed`, the last order the persistence gateway
//! accepted. Drops mutate `local` immediately; `confirmed` only advances
//! when a save resolves successfully and is the rollback target when one
//! fails.
//!
//! Move handling is pure: every operation returns a typed outcome and
//! invalid gestures leave the store untouched.

use crate::hierarchy::{assign_sequential_order, canonical_sequence, renumber_sibling_groups};
use crate::types::{ReorderBatch, SubjectId, SubjectItem};

/// How drops are validated and how the list is renumbered afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePolicy {
    /// One section-wide sequence. Any item may be dropped onto any other
    /// and `order` is the 1-based position in the flattened list, so a
    /// cross-level drop can place a parent between another parent's
    /// children.
    #[default]
    GlobalSequence,

    /// Drops are confined to the source's sibling group. Cross-level drops
    /// are refused like any other invalid move and each group keeps its own
    /// contiguous sequence.
    SameLevelOnly,
}

/// Result of attempting a local move.
///
/// Everything except `Applied` means the store was left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The list was reordered and renumbered.
    Applied,

    /// Source and target are the same item; nothing to do.
    IdenticalIds,

    /// The dragged item is no longer in the list.
    UnknownSource,

    /// The drop target is no longer in the list.
    UnknownTarget,

    /// Source and target live in different sibling groups. Only produced
    /// under [`MovePolicy::SameLevelOnly`].
    CrossLevel,
}

impl MoveOutcome {
    /// Returns true if the move changed the list.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied)
    }
}

/// Local ordering state plus the last gateway-confirmed snapshot.
#[derive(Debug, Clone)]
pub struct OptimisticOrderStore {
    local: Vec<SubjectItem>,
    confirmed: Vec<SubjectItem>,
    pending_changes: bool,
    policy: MovePolicy,
}

impl OptimisticOrderStore {
    /// Creates a store from the section's current item list.
    ///
    /// The given list is treated as gateway-confirmed: it is what the
    /// engine rolls back to if the first save fails.
    pub fn new(items: Vec<SubjectItem>, policy: MovePolicy) -> Self {
        let mut store = OptimisticOrderStore {
            local: Vec::new(),
            confirmed: Vec::new(),
            pending_changes: false,
            policy,
        };
        store.adopt(items);
        store
    }

    /// The order the UI shows right now.
    pub fn items(&self) -> &[SubjectItem] {
        &self.local
    }

    /// The last order the gateway accepted.
    pub fn confirmed(&self) -> &[SubjectItem] {
        &self.confirmed
    }

    /// True between a successful drop and the start of its save attempt.
    pub fn has_pending_changes(&self) -> bool {
        self.pending_changes
    }

    /// The active move policy.
    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    /// Replaces both copies with a fresh list from the data source.
    ///
    /// Items are resequenced by their `order` field; the caller guards
    /// against adopting while edits are pending.
    pub fn adopt(&mut self, mut items: Vec<SubjectItem>) {
        items.sort_by_key(|item| item.order);
        self.local = items.clone();
        self.confirmed = items;
        self.pending_changes = false;
    }

    /// Moves `source` immediately before `target` and renumbers.
    ///
    /// The move operates on the canonical depth-first sequence: remove the
    /// source row, find the target's position in what remains, insert the
    /// source there. Anything other than `Applied` leaves the store
    /// untouched.
    pub fn apply_move(&mut self, source: SubjectId, target: SubjectId) -> MoveOutcome {
        if source == target {
            return MoveOutcome::IdenticalIds;
        }

        let sequence = canonical_sequence(&self.local);

        let Some(source_index) = sequence.iter().position(|item| item.id == source) else {
            return MoveOutcome::UnknownSource;
        };
        if !sequence.iter().any(|item| item.id == target) {
            return MoveOutcome::UnknownTarget;
        }

        if self.policy == MovePolicy::SameLevelOnly {
            let source_parent = sequence[source_index].parent_id;
            let target_parent = sequence
                .iter()
                .find(|item| item.id == target)
                .and_then(|item| item.parent_id);
            if source_parent != target_parent {
                return MoveOutcome::CrossLevel;
            }
        }

        let mut sequence = sequence;
        let moved = sequence.remove(source_index);
        let insert_at = sequence
            .iter()
            .position(|item| item.id == target)
            .unwrap_or(sequence.len());
        sequence.insert(insert_at, moved);

        self.local = match self.policy {
            MovePolicy::GlobalSequence => assign_sequential_order(sequence),
            MovePolicy::SameLevelOnly => renumber_sibling_groups(sequence),
        };
        self.pending_changes = true;
        MoveOutcome::Applied
    }

    /// Marks the pending edits as handed to a save attempt.
    pub fn clear_pending(&mut self) {
        self.pending_changes = false;
    }

    /// Discards all optimistic edits and restores the confirmed order.
    pub fn rollback(&mut self) {
        self.local = self.confirmed.clone();
        self.pending_changes = false;
    }

    /// Records a gateway-accepted snapshot as the new confirmed order.
    ///
    /// `local` is not touched: edits newer than the accepted batch survive.
    pub fn confirm(&mut self, snapshot: Vec<SubjectItem>) {
        self.confirmed = snapshot;
    }

    /// A clone of the current local order, for save requests.
    pub fn snapshot(&self) -> Vec<SubjectItem> {
        self.local.clone()
    }

    /// The full proposed ordering as a gateway payload.
    pub fn batch(&self) -> ReorderBatch {
        ReorderBatch::from_items(&self.local)
    }
}

//! Published engine state.
//!
//! After every mutation the engine publishes a complete [`EngineState`]
//! snapshot on a watch channel. Renders read the snapshot; nothing outside
//! the engine task mutates it.

use std::fmt;

use crate::hierarchy::{SubjectNode, build_tree};
use crate::notify::Notice;
use crate::session::DragSession;
use crate::types::SubjectItem;

/// Lifecycle phase derived from the two state flags.
///
/// The phase is a read-only projection for logs and tests; the flags are
/// the actual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Local order matches the last confirmed order; nothing scheduled.
    Clean,

    /// Optimistic edits are waiting out the debounce quiet period.
    Dirty,

    /// A gateway call is in flight and no newer edits exist.
    Saving,

    /// New edits arrived while a gateway call was in flight. The in-flight
    /// call is not cancelled; the newer ordering follows it.
    SavingDirty,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnginePhase::Clean => "clean",
            EnginePhase::Dirty => "dirty",
            EnginePhase::Saving => "saving",
            EnginePhase::SavingDirty => "saving-dirty",
        };
        write!(f, "{name}")
    }
}

/// Snapshot of everything a render needs.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// The optimistic item order the UI should show right now.
    pub items: Vec<SubjectItem>,

    /// True between a successful drop and the start of its save attempt.
    pub pending_changes: bool,

    /// True while a gateway call is in flight.
    pub is_saving: bool,

    /// The in-progress drag gesture, for drop-target feedback.
    pub drag: DragSession,

    /// The save notice currently on display, if any.
    pub notice: Option<Notice>,
}

impl EngineState {
    /// The state published before any event has been processed.
    pub fn initial(items: Vec<SubjectItem>) -> Self {
        EngineState {
            items,
            pending_changes: false,
            is_saving: false,
            drag: DragSession::new(),
            notice: None,
        }
    }

    /// Derives the lifecycle phase from the flags.
    pub fn phase(&self) -> EnginePhase {
        match (self.pending_changes, self.is_saving) {
            (false, false) => EnginePhase::Clean,
            (true, false) => EnginePhase::Dirty,
            (false, true) => EnginePhase::Saving,
            (true, true) => EnginePhase::SavingDirty,
        }
    }

    /// True when the local order is the confirmed order and no save is
    /// scheduled or running.
    pub fn is_clean(&self) -> bool {
        !self.pending_changes && !self.is_saving
    }

    /// Derives the two-level tree view for rendering.
    pub fn tree(&self) -> Vec<SubjectNode> {
        build_tree(&self.items)
    }
}

//! Transient drag gesture state.
//!
//! Tracks which item is being dragged and which item the pointer is over.
//! The session carries no ordering data; it exists so drop events can name
//! their source and so the UI can render drop-target feedback. It is never
//! persisted and resets whenever a gesture ends.

use crate::types::SubjectId;

/// The in-progress drag gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSession {
    active: Option<SubjectId>,
    hover: Option<SubjectId>,
}

impl DragSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        DragSession::default()
    }

    /// Records the picked-up item and marks the session as dragging.
    pub fn begin(&mut self, item: SubjectId) {
        self.active = Some(item);
        self.hover = None;
    }

    /// Records the current hover target, replacing any previous one.
    pub fn over(&mut self, target: SubjectId) {
        self.hover = Some(target);
    }

    /// Clears the session. Called on drop completion or gesture cancel.
    pub fn end(&mut self) {
        self.active = None;
        self.hover = None;
    }

    /// Returns true while a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The item currently being dragged.
    pub fn active(&self) -> Option<SubjectId> {
        self.active
    }

    /// The item currently hovered as a drop target.
    pub fn hover(&self) -> Option<SubjectId> {
        self.hover
    }
}

//! Engine message types for async communication.
//!
//! This module defines the messages a reorder engine receives from its
//! handles. The engine processes them serially in its event loop, so every
//! local mutation is published before the next event is looked at.

use crate::types::{SubjectId, SubjectItem};

/// Messages that can be sent to a reorder engine.
///
/// Sent via `tokio::sync::mpsc` from [`ReorderHandle`](super::ReorderHandle)
/// methods; hosts do not construct these directly.
#[derive(Debug)]
pub enum EngineMessage {
    /// The user picked up an item.
    ///
    /// Starts the transient drag session so drop events can name their
    /// source. No ordering state changes.
    DragStart(SubjectId),

    /// The pointer moved over a potential drop target.
    ///
    /// Replaces the previous hover target; the published session lets the
    /// UI render drop-target feedback.
    DragOver(SubjectId),

    /// The dragged item was released over a target.
    ///
    /// Applies the optimistic move and, if the list changed, (re)arms the
    /// debounced save. Invalid drops are absorbed without any state change.
    Drop {
        /// The item the source was dropped onto.
        target: SubjectId,
    },

    /// The drag gesture ended.
    ///
    /// Clears the transient session. Ordering state is untouched; a drop
    /// that already happened stays applied.
    DragEnd,

    /// The external data source published a fresh item list.
    ///
    /// Adopted as the new confirmed order only when the engine is clean;
    /// ignored while optimistic edits or a save are in flight, so a slow
    /// refresh can never clobber an unsaved reorder.
    SourceChanged(Vec<SubjectItem>),

    /// Stop the engine.
    ///
    /// The armed save timer is cancelled, an in-flight gateway call is
    /// awaited and applied, and the event loop exits.
    Detach,
}

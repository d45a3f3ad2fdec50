//! Host-facing handle for a running engine.
//!
//! A handle is the only way to talk to an engine once it is spawned: UI
//! events go in through the message channel, state snapshots come out
//! through a watch channel. Handles are cheap to clone; the engine stops
//! when it is detached or when the last handle is dropped.

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use super::message::EngineMessage;
use super::state::EngineState;
use crate::types::{SubjectId, SubjectItem};

/// Errors from handle operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine task has stopped and no longer accepts events.
    #[error("reorder engine is detached")]
    Detached,
}

/// Sends UI events to a running engine and observes its published state.
#[derive(Debug, Clone)]
pub struct ReorderHandle {
    tx: mpsc::Sender<EngineMessage>,
    state_rx: watch::Receiver<EngineState>,
}

impl ReorderHandle {
    pub(super) fn new(
        tx: mpsc::Sender<EngineMessage>,
        state_rx: watch::Receiver<EngineState>,
    ) -> Self {
        ReorderHandle { tx, state_rx }
    }

    /// The user picked up an item.
    pub async fn drag_start(&self, item: SubjectId) -> Result<(), EngineError> {
        self.send(EngineMessage::DragStart(item)).await
    }

    /// The pointer moved over a potential drop target.
    pub async fn drag_over(&self, target: SubjectId) -> Result<(), EngineError> {
        self.send(EngineMessage::DragOver(target)).await
    }

    /// The dragged item was released over the target.
    pub async fn drop_on(&self, target: SubjectId) -> Result<(), EngineError> {
        self.send(EngineMessage::Drop { target }).await
    }

    /// The drag gesture ended.
    pub async fn drag_end(&self) -> Result<(), EngineError> {
        self.send(EngineMessage::DragEnd).await
    }

    /// The external data source published a fresh item list.
    pub async fn update_source(&self, items: Vec<SubjectItem>) -> Result<(), EngineError> {
        self.send(EngineMessage::SourceChanged(items)).await
    }

    /// Stops the engine after it settles any in-flight save.
    pub async fn detach(&self) -> Result<(), EngineError> {
        self.send(EngineMessage::Detach).await
    }

    /// The most recently published state snapshot.
    pub fn state(&self) -> EngineState {
        self.state_rx.borrow().clone()
    }

    /// A watch receiver for published snapshots.
    ///
    /// The receiver keeps the last value after the engine stops, so a final
    /// render survives detach.
    pub fn subscribe(&self) -> watch::Receiver<EngineState> {
        self.state_rx.clone()
    }

    /// True while the engine task is still accepting events.
    pub fn is_attached(&self) -> bool {
        !self.tx.is_closed()
    }

    async fn send(&self, msg: EngineMessage) -> Result<(), EngineError> {
        self.tx.send(msg).await.map_err(|_| EngineError::Detached)
    }
}

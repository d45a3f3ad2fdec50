//! Save execution and the single-flight guard.
//!
//! The runner owns the gateway and turns matured save requests into spawned
//! submission tasks. Completions come back to the engine loop as
//! [`SaveOutcome`] messages on a dedicated channel, so results are applied
//! with the same serial ordering as every other event.
//!
//! At most one gateway call is ever in flight. A request that matures while
//! one is running is parked in a single queued slot (newest wins) and
//! submitted the moment the in-flight call resolves.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use super::gateway::ReorderGateway;
use crate::debounce::SaveRequest;

/// A failed save attempt.
///
/// Every gateway error collapses into this one shape: the engine does not
/// classify failures, distinguish timeouts from rejections, or retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("save failed: {message}")]
pub struct SaveError {
    /// The gateway's rendering of what went wrong, for the log.
    pub message: String,
}

impl SaveError {
    /// Wraps a gateway error.
    pub fn new(message: impl Into<String>) -> Self {
        SaveError {
            message: message.into(),
        }
    }
}

/// The resolution of one submitted save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The request as submitted, including the item snapshot behind it.
    pub request: SaveRequest,

    /// Whether the gateway accepted the batch.
    pub result: Result<(), SaveError>,
}

impl SaveOutcome {
    /// Returns true if the gateway accepted the batch.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// How the runner handled a matured request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDisposition {
    /// Submitted to the gateway immediately.
    Started,

    /// Parked behind the in-flight call; replaces any previously queued
    /// request.
    Queued,
}

/// Owns the gateway and enforces single-flight submission.
#[derive(Debug)]
pub struct PersistRunner<G> {
    gateway: Arc<G>,
    outcome_tx: mpsc::Sender<SaveOutcome>,
    in_flight: bool,
    queued: Option<SaveRequest>,
}

impl<G> PersistRunner<G>
where
    G: ReorderGateway + Send + Sync + 'static,
{
    /// Creates a runner and the channel its outcomes arrive on.
    pub fn new(gateway: G) -> (Self, mpsc::Receiver<SaveOutcome>) {
        // One in flight plus one queued means two outcomes can be pending
        // at once; a little headroom avoids ever blocking the save task.
        let (outcome_tx, outcome_rx) = mpsc::channel(8);
        (
            PersistRunner {
                gateway: Arc::new(gateway),
                outcome_tx,
                in_flight: false,
                queued: None,
            },
            outcome_rx,
        )
    }

    /// True while a gateway call is in flight.
    pub fn is_saving(&self) -> bool {
        self.in_flight
    }

    /// True if a request is parked behind the in-flight call.
    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// Submits the request now, or parks it if a call is in flight.
    pub fn request(&mut self, request: SaveRequest) -> SaveDisposition {
        if self.in_flight {
            if self.queued.is_some() {
                debug!("replacing queued save request with newer ordering");
            }
            self.queued = Some(request);
            SaveDisposition::Queued
        } else {
            self.start(request);
            SaveDisposition::Started
        }
    }

    /// Records the in-flight call as resolved and starts the queued request,
    /// if any.
    ///
    /// Returns true if a queued request was started, which means the
    /// just-resolved outcome has been superseded by a newer ordering.
    pub fn on_resolved(&mut self) -> bool {
        self.in_flight = false;
        if let Some(next) = self.queued.take() {
            self.start(next);
            true
        } else {
            false
        }
    }

    /// Drops any parked request without submitting it.
    ///
    /// Returns true if one was discarded. Used on teardown: the queued
    /// ordering dies with the armed timer.
    pub fn discard_queued(&mut self) -> bool {
        self.queued.take().is_some()
    }

    fn start(&mut self, request: SaveRequest) {
        self.in_flight = true;
        let gateway = Arc::clone(&self.gateway);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = gateway
                .submit(request.batch.clone())
                .await
                .map_err(|error| SaveError::new(error.to_string()));
            let outcome = SaveOutcome { request, result };
            if outcome_tx.send(outcome).await.is_err() {
                debug!("engine detached before save outcome could be delivered");
            }
        });
    }
}

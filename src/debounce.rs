//! Debounced save scheduling.
//!
//! Rapid drops collapse into one save: every `schedule` call replaces the
//! armed request and restarts the quiet period, so when the deadline finally
//! elapses only the most recent ordering is handed to the persistence layer.
//! The scheduler holds plain data; the engine loop owns the actual sleeping
//! and asks for due work when it wakes.

use tokio::time::{Duration, Instant};

use crate::types::{ReorderBatch, SubjectItem};

/// A save request captured at scheduling time.
///
/// Carries both the gateway payload and the item snapshot it was derived
/// from; the snapshot becomes the confirmed order if the gateway accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub batch: ReorderBatch,
    pub items: Vec<SubjectItem>,
}

impl SaveRequest {
    /// Builds a request from an item snapshot.
    pub fn from_items(items: Vec<SubjectItem>) -> Self {
        SaveRequest {
            batch: ReorderBatch::from_items(&items),
            items,
        }
    }
}

/// The armed deadline and the newest request behind it.
#[derive(Debug)]
struct ArmedSave {
    deadline: Instant,
    request: SaveRequest,
}

/// Coalesces reorder gestures into a single deferred save.
#[derive(Debug)]
pub struct DebounceScheduler {
    quiet_period: Duration,
    armed: Option<ArmedSave>,
}

impl DebounceScheduler {
    /// Creates a disarmed scheduler with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        DebounceScheduler {
            quiet_period,
            armed: None,
        }
    }

    /// Arms the deadline with a new request.
    ///
    /// Any previously armed request is discarded and the quiet period
    /// restarts from now.
    pub fn schedule(&mut self, request: SaveRequest) {
        self.armed = Some(ArmedSave {
            deadline: Instant::now() + self.quiet_period,
            request,
        });
    }

    /// The instant the armed save becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|armed| armed.deadline)
    }

    /// True while a save is waiting out its quiet period.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Hands over the armed request if its deadline has passed.
    ///
    /// Firing disarms the scheduler; the same request is never handed over
    /// twice.
    pub fn fire_due(&mut self, now: Instant) -> Option<SaveRequest> {
        if self.armed.as_ref()?.deadline > now {
            return None;
        }
        self.armed.take().map(|armed| armed.request)
    }

    /// Disarms without firing. Returns true if a request was discarded.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }
}

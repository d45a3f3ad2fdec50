//! Shared test doubles and arbitrary generators for property-based testing.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use tokio::sync::mpsc;

use crate::hierarchy::assign_sequential_order;
use crate::notify::{Notice, NotificationSink};
use crate::persist::ReorderGateway;
use crate::types::{ReorderBatch, SubjectItem};

/// Section lists shaped like real data: a handful of roots, each followed by
/// its children, with sequential orders already assigned. Never empty.
pub fn arb_section_items() -> impl Strategy<Value = Vec<SubjectItem>> {
    prop::collection::vec(0usize..=3, 2..=6).prop_map(|child_counts| {
        let mut items = Vec::new();
        let mut next_id = 1u64;
        for child_count in child_counts {
            let root_id = next_id;
            next_id += 1;
            items.push(SubjectItem::root(root_id, 0));
            for _ in 0..child_count {
                items.push(SubjectItem::child(next_id, root_id, 0));
                next_id += 1;
            }
        }
        assign_sequential_order(items)
    })
}

/// The same lists with their entries shuffled, for canonicalization tests.
pub fn arb_shuffled_section_items() -> impl Strategy<Value = Vec<SubjectItem>> {
    arb_section_items().prop_shuffle()
}

/// A gateway that records every submitted batch and answers immediately.
///
/// Calls fail with the configured message while one is set, so a single
/// instance can serve both the happy path and the rollback path of a test.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    calls: Arc<Mutex<Vec<ReorderBatch>>>,
    fail_message: Arc<Mutex<Option<String>>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every batch with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        let gateway = Self::new();
        gateway.set_failure(Some(message.into()));
        gateway
    }

    /// Sets or clears the failure injected into subsequent calls.
    pub fn set_failure(&self, message: Option<String>) {
        *self.fail_message.lock().unwrap() = message;
    }

    pub fn calls(&self) -> Vec<ReorderBatch> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<ReorderBatch> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl ReorderGateway for RecordingGateway {
    type Error = String;

    fn submit(&self, batch: ReorderBatch) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.calls.lock().unwrap().push(batch);
        let failure = self.fail_message.lock().unwrap().clone();
        async move {
            match failure {
                Some(message) => Err(message),
                None => Ok(()),
            }
        }
    }
}

/// A gateway that holds every submission open until the test releases it.
///
/// Each call parks awaiting one directive from the release channel, which
/// decides its result. Dropping the release sender answers all remaining
/// calls with success. Overlap is tracked so tests can assert single-flight
/// behavior.
#[derive(Debug, Clone)]
pub struct GatedGateway {
    calls: Arc<Mutex<Vec<ReorderBatch>>>,
    directives: Arc<tokio::sync::Mutex<mpsc::Receiver<Result<(), String>>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl GatedGateway {
    /// Returns the gateway and the sender that releases parked submissions,
    /// one directive per call.
    pub fn new() -> (Self, mpsc::Sender<Result<(), String>>) {
        let (release_tx, release_rx) = mpsc::channel(8);
        let gateway = GatedGateway {
            calls: Arc::new(Mutex::new(Vec::new())),
            directives: Arc::new(tokio::sync::Mutex::new(release_rx)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        };
        (gateway, release_tx)
    }

    pub fn calls(&self) -> Vec<ReorderBatch> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most submissions ever awaiting release at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ReorderGateway for GatedGateway {
    type Error = String;

    fn submit(&self, batch: ReorderBatch) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let calls = Arc::clone(&self.calls);
        let directives = Arc::clone(&self.directives);
        let in_flight = Arc::clone(&self.in_flight);
        let max_in_flight = Arc::clone(&self.max_in_flight);
        async move {
            calls.lock().unwrap().push(batch);
            let running = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            max_in_flight.fetch_max(running, Ordering::SeqCst);
            let directive = directives.lock().await.recv().await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            directive.unwrap_or(Ok(()))
        }
    }
}

/// A sink that captures notices for assertion instead of logging them.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

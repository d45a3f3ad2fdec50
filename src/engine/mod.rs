//! The reorder engine: composition root and event loop.
//!
//! One engine instance owns the ordering state for one class section. UI
//! events, data-source refreshes, and save completions all arrive as
//! messages on the engine task and are processed serially, so the published
//! state always reflects a single consistent history: local mutations are
//! visible to the next render before any persistence work starts.
//!
//! # Architecture
//!
//! ```text
//! ReorderHandle ──mpsc──► ReorderEngine::run ──spawn──► gateway.submit
//!      ▲                  │ drag session                     │
//!      │                  │ optimistic store                 │
//!      └──watch snapshot──┤ debounce scheduler ◄──mpsc───────┘
//!                         │ persist runner        (SaveOutcome)
//! ```
//!
//! The loop sleeps until the earliest of the debounce deadline and the
//! notice-expiry deadline, waking early for messages and save outcomes.
//!
//! # Lifecycle
//!
//! Clean until a drop succeeds, then dirty while the quiet period runs,
//! then saving while the gateway call is in flight. A success confirms the
//! submitted snapshot; a failure rolls local state back to the last
//! confirmed order. Drops that land mid-save make the engine dirty again
//! without cancelling the in-flight call; at most one gateway call runs at
//! a time, with the newest matured batch parked until the current call
//! resolves.

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::EngineConfig;
use crate::debounce::{DebounceScheduler, SaveRequest};
use crate::notify::{Notice, NotificationSink, TracingSink};
use crate::persist::{PersistRunner, ReorderGateway, SaveDisposition, SaveOutcome};
use crate::session::DragSession;
use crate::store::OptimisticOrderStore;
use crate::types::{SectionId, SubjectId, SubjectItem};

pub mod handle;
pub mod message;
pub mod state;


pub use handle::{EngineError, ReorderHandle};
pub use message::EngineMessage;
pub use state::{EnginePhase, EngineState};

/// Channel buffer size for engine messages.
const ENGINE_CHANNEL_BUFFER: usize = 64;

/// Drag-and-drop reorder engine for one class section.
///
/// Construct with [`ReorderEngine::new`], customize with the builder
/// methods, then either [`spawn`](ReorderEngine::spawn) it onto the runtime
/// or drive [`run`](ReorderEngine::run) from a task you manage.
pub struct ReorderEngine<G> {
    section: SectionId,
    config: EngineConfig,
    store: OptimisticOrderStore,
    session: DragSession,
    scheduler: DebounceScheduler,
    runner: PersistRunner<G>,
    outcome_rx: mpsc::Receiver<SaveOutcome>,
    state_tx: watch::Sender<EngineState>,
    sink: Box<dyn NotificationSink + Send>,
    notice: Option<Notice>,
    notice_expires: Option<Instant>,
}

impl<G> ReorderEngine<G>
where
    G: ReorderGateway + Send + Sync + 'static,
{
    /// Creates an engine over the section's current item list.
    ///
    /// The list is treated as gateway-confirmed. Notices go to the tracing
    /// log unless a sink is attached with
    /// [`with_sink`](ReorderEngine::with_sink).
    pub fn new(
        section: SectionId,
        items: Vec<SubjectItem>,
        gateway: G,
        config: EngineConfig,
    ) -> Self {
        let store = OptimisticOrderStore::new(items, config.policy);
        let (runner, outcome_rx) = PersistRunner::new(gateway);
        let scheduler = DebounceScheduler::new(config.quiet_period);
        let (state_tx, _) = watch::channel(EngineState::initial(store.snapshot()));

        ReorderEngine {
            section,
            config,
            store,
            session: DragSession::new(),
            scheduler,
            runner,
            outcome_rx,
            state_tx,
            sink: Box::new(TracingSink),
            notice: None,
            notice_expires: None,
        }
    }

    /// Replaces the notification sink.
    pub fn with_sink(mut self, sink: impl NotificationSink + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// The section this engine is scoped to.
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// A watch receiver for published state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<EngineState> {
        self.state_tx.subscribe()
    }

    /// Spawns the engine onto the runtime and returns its handle.
    ///
    /// The task exits when the handle detaches it or every handle clone is
    /// dropped.
    pub fn spawn(self) -> ReorderHandle {
        self.spawn_with_shutdown(CancellationToken::new())
    }

    /// Spawns the engine with an externally controlled shutdown token.
    pub fn spawn_with_shutdown(self, shutdown: CancellationToken) -> ReorderHandle {
        let (tx, rx) = mpsc::channel(ENGINE_CHANNEL_BUFFER);
        let handle = ReorderHandle::new(tx, self.subscribe());
        tokio::spawn(self.run(rx, shutdown));
        handle
    }

    /// Runs the engine event loop.
    ///
    /// Processes messages from the channel, fires the debounce and
    /// notice-expiry deadlines, applies save outcomes, and responds to
    /// shutdown signals. Returns once the engine has detached and settled
    /// any in-flight save.
    #[instrument(skip(self, rx, shutdown), fields(section = %self.section))]
    pub async fn run(mut self, mut rx: mpsc::Receiver<EngineMessage>, shutdown: CancellationToken) {
        info!(
            items = self.store.items().len(),
            quiet_period_ms = self.config.quiet_period.as_millis() as u64,
            "Reorder engine started"
        );

        loop {
            // Sleep until whichever deadline comes first.
            let debounce_delay = self
                .scheduler
                .deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()));
            let notice_delay = self
                .notice_expires
                .map(|deadline| deadline.saturating_duration_since(Instant::now()));
            let next_wakeup = match (debounce_delay, notice_delay) {
                (Some(d), Some(n)) => Some(d.min(n)),
                (Some(d), None) => Some(d),
                (None, Some(n)) => Some(n),
                (None, None) => None,
            };

            tokio::select! {
                // Graceful shutdown
                _ = shutdown.cancelled() => {
                    info!("Shutdown signal received, detaching engine");
                    break;
                }

                // Incoming UI event or source refresh
                msg = rx.recv() => {
                    match msg {
                        Some(EngineMessage::Detach) => {
                            info!("Detach requested");
                            break;
                        }
                        Some(msg) => self.handle_message(msg),
                        None => {
                            debug!("All handles dropped, detaching engine");
                            break;
                        }
                    }
                }

                // A spawned save task resolved
                outcome = self.outcome_rx.recv() => {
                    match outcome {
                        Some(outcome) => self.handle_save_resolved(outcome),
                        // The runner holds a sender, so this arm only closes
                        // during teardown.
                        None => break,
                    }
                }

                // Deadline wakeup (debounce fire or notice expiry)
                _ = async {
                    match next_wakeup {
                        Some(delay) => tokio::time::sleep(delay).await,
                        None => std::future::pending().await,
                    }
                } => {
                    self.handle_deadlines();
                }
            }
        }

        self.settle().await;
        info!("Reorder engine stopped");
    }

    /// Handles one incoming message.
    fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::DragStart(item) => self.handle_drag_start(item),
            EngineMessage::DragOver(target) => self.handle_drag_over(target),
            EngineMessage::Drop { target } => self.handle_drop(target),
            EngineMessage::DragEnd => self.handle_drag_end(),
            EngineMessage::SourceChanged(items) => self.handle_source_changed(items),
            EngineMessage::Detach => {
                // Handled in run() loop
            }
        }
    }

    fn handle_drag_start(&mut self, item: SubjectId) {
        trace!(%item, "Drag started");
        self.session.begin(item);
        self.publish();
    }

    fn handle_drag_over(&mut self, target: SubjectId) {
        trace!(%target, "Hover target changed");
        self.session.over(target);
        self.publish();
    }

    /// Applies the optimistic move and (re)arms the debounced save.
    fn handle_drop(&mut self, target: SubjectId) {
        let Some(source) = self.session.active() else {
            debug!(%target, "Drop without an active drag ignored");
            return;
        };

        let outcome = self.store.apply_move(source, target);
        if outcome.is_applied() {
            debug!(%source, %target, "Reordered locally, save scheduled");
            self.scheduler
                .schedule(SaveRequest::from_items(self.store.snapshot()));
        } else {
            // Stale ids and self-drops are expected UI noise, not errors.
            debug!(%source, %target, ?outcome, "Move refused, list unchanged");
        }
        self.publish();
    }

    fn handle_drag_end(&mut self) {
        trace!("Drag ended");
        self.session.end();
        self.publish();
    }

    /// Adopts a refreshed item list, unless local edits would be lost.
    fn handle_source_changed(&mut self, items: Vec<SubjectItem>) {
        if self.store.has_pending_changes() || self.runner.is_saving() || self.scheduler.is_armed()
        {
            debug!(
                incoming = items.len(),
                "Source update ignored while edits are in flight"
            );
            return;
        }

        debug!(incoming = items.len(), "Adopting refreshed source items");
        self.store.adopt(items);
        self.publish();
    }

    /// Applies the outcome of a resolved gateway call.
    ///
    /// If a parked request started in its place, the resolved outcome has
    /// been superseded: a success still advances the confirmed snapshot but
    /// neither result is surfaced to the user, because the newer ordering is
    /// about to overwrite it.
    fn handle_save_resolved(&mut self, outcome: SaveOutcome) {
        let superseded = self.runner.on_resolved();

        if superseded {
            match &outcome.result {
                Ok(()) => {
                    debug!("Superseded save accepted; confirmed order advanced");
                    self.store.confirm(outcome.request.items);
                }
                Err(error) => {
                    debug!(%error, "Superseded save failed; newer ordering follows anyway");
                }
            }
            if !self.scheduler.is_armed() {
                self.store.clear_pending();
            }
            self.publish();
            return;
        }

        match outcome.result {
            Ok(()) => {
                info!(
                    entries = outcome.request.batch.len(),
                    "Reorder batch accepted"
                );
                self.store.confirm(outcome.request.items);
                self.post_notice(Notice::saved());
            }
            Err(error) => {
                warn!(%error, "Reorder batch rejected; rolling back to confirmed order");
                if self.scheduler.cancel() {
                    debug!("Armed save timer discarded by rollback");
                }
                self.store.rollback();
                self.post_notice(Notice::save_failed());
            }
        }
        self.publish();
    }

    /// Fires whichever deadlines have passed.
    fn handle_deadlines(&mut self) {
        let now = Instant::now();

        if let Some(request) = self.scheduler.fire_due(now) {
            match self.runner.request(request) {
                SaveDisposition::Started => {
                    debug!("Quiet period elapsed, submitting reorder batch");
                    self.store.clear_pending();
                }
                SaveDisposition::Queued => {
                    debug!("Quiet period elapsed mid-save; batch parked until it resolves");
                }
            }
            self.publish();
        }

        if let Some(expires) = self.notice_expires
            && expires <= now
        {
            trace!("Notice display time elapsed");
            self.notice = None;
            self.notice_expires = None;
            self.publish();
        }
    }

    /// Emits a notice to the sink and puts it on display.
    fn post_notice(&mut self, notice: Notice) {
        self.sink.notify(&notice);
        self.notice = Some(notice);
        self.notice_expires = Some(Instant::now() + self.config.notice_duration);
    }

    /// Publishes the current state snapshot to all subscribers.
    fn publish(&self) {
        let state = EngineState {
            items: self.store.snapshot(),
            pending_changes: self.store.has_pending_changes(),
            is_saving: self.runner.is_saving(),
            drag: self.session,
            notice: self.notice.clone(),
        };
        trace!(phase = %state.phase(), "Publishing state");
        self.state_tx.send_replace(state);
    }

    /// Settles outstanding work before the engine drops.
    ///
    /// The armed timer and any parked request die here; an in-flight
    /// gateway call is awaited and its outcome applied so the final
    /// published state is truthful.
    async fn settle(&mut self) {
        if self.scheduler.cancel() {
            debug!("Unsaved reorder discarded on detach");
        }
        if self.runner.discard_queued() {
            debug!("Parked save request discarded on detach");
        }
        if self.runner.is_saving() {
            debug!("Waiting for in-flight save to resolve before detaching");
            if let Some(outcome) = self.outcome_rx.recv().await {
                self.handle_save_resolved(outcome);
            }
        }
        self.publish();
    }
}

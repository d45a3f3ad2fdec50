//! Persistence gateway trait.
//!
//! The gateway is the seam between the engine and whatever actually stores
//! subject orderings (an HTTP API, a local database, a test double). The
//! trait-based design enables:
//! - Mock gateways for testing
//! - Logging/dry-run gateways
//! - Transport implementations owned by the host application

use std::fmt;
use std::future::Future;

use tracing::debug;

use crate::types::ReorderBatch;

/// Submits reorder batches to the backing store.
///
/// Implementations are constructed scoped to one class section, so every
/// batch submitted through a single gateway instance belongs to that
/// section.
///
/// The contract is idempotent: a batch carries the full proposed ordering,
/// so resubmitting the same batch yields the same stored state.
///
/// Any `Err` means the batch was not accepted and the engine rolls back.
/// Transport concerns (timeouts, connection retries, auth refresh) are the
/// implementation's business and must resolve into a single `Result` before
/// returning; the engine treats every error uniformly and never retries on
/// its own. Implementations should return errors rather than panic: a panic
/// inside `submit` strands the engine's saving flag.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct OfflineGateway;
///
/// impl ReorderGateway for OfflineGateway {
///     type Error = String;
///
///     async fn submit(&self, _batch: ReorderBatch) -> Result<(), Self::Error> {
///         Err("section service unreachable".to_string())
///     }
/// }
/// ```
pub trait ReorderGateway {
    /// The error type returned by this gateway.
    type Error: fmt::Display;

    /// Submit a full proposed ordering.
    fn submit(&self, batch: ReorderBatch) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// A gateway that logs batches without persisting them.
///
/// Used by the demo binary and for wiring the engine before the host's real
/// transport exists. Accepts every batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingGateway;

impl LoggingGateway {
    /// Creates a new logging gateway.
    pub fn new() -> Self {
        LoggingGateway
    }
}

impl ReorderGateway for LoggingGateway {
    type Error = std::convert::Infallible;

    fn submit(&self, batch: ReorderBatch) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let payload = serde_json::to_string(&batch)
            .unwrap_or_else(|_| "<unserializable batch>".to_string());
        debug!(
            entries = batch.len(),
            %payload,
            "LoggingGateway: batch accepted (not persisted)"
        );
        async move { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectItem;

    #[tokio::test]
    async fn logging_gateway_accepts_every_batch() {
        let gateway = LoggingGateway::new();
        let batch = ReorderBatch::from_items(&[
            SubjectItem::root(1u64, 1),
            SubjectItem::root(2u64, 2),
        ]);

        let result = gateway.submit(batch).await;

        assert!(result.is_ok());
    }
}

//! Persistence: the gateway seam and the save runner.

pub mod gateway;
pub mod runner;

pub use gateway::{LoggingGateway, ReorderGateway};
pub use runner::{PersistRunner, SaveDisposition, SaveError, SaveOutcome};

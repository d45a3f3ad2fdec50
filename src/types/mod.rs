//! Core domain types for the reorder engine.
//!
//! This module contains all the fundamental types used throughout the crate,
//! designed to encode invariants via the type system.

pub mod batch;
pub mod ids;
pub mod item;

// Re-export commonly used types at the module level
pub use batch::{OrderAssignment, ReorderBatch};
pub use ids::{SectionId, SubjectId};
pub use item::SubjectItem;

//! Subject Reorder - drag-and-drop ordering of hierarchical subject lists.
//!
//! This library provides the reordering engine behind section administration
//! screens: optimistic local moves, debounced batch persistence, and
//! rollback with user notification when a save is rejected.

pub mod config;
pub mod debounce;
pub mod engine;
pub mod hierarchy;
pub mod notify;
pub mod persist;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;

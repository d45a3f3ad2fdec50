//! Hierarchy flattening and tree derivation.
//!
//! Pure functions over the flat subject list: deriving the two-level tree
//! view, flattening it back into the display sequence, and renumbering.
//! Nothing here touches engine state; the optimistic store composes these.

pub mod flatten;
pub mod tree;

pub use flatten::{assign_sequential_order, canonical_sequence, flatten, renumber_sibling_groups};
pub use tree::{SubjectNode, build_tree, orphaned_children};

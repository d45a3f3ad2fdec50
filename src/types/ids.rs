//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different ID types (e.g., using a
//! SectionId where a SubjectId is expected) and make the code more
//! self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject row within a class section's curriculum list.
///
/// Identifies both top-level subjects and their child topics; the two are
/// distinguished by `SubjectItem::parent_id`, not by the id type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub u64);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SubjectId {
    fn from(n: u64) -> Self {
        SubjectId(n)
    }
}

/// A class-section identifier.
///
/// Every engine instance is scoped to exactly one section; items from
/// different sections never share an ordering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub u64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SectionId {
    fn from(n: u64) -> Self {
        SectionId(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod subject_id {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serde_roundtrip(n: u64) {
                let id = SubjectId(n);
                let json = serde_json::to_string(&id).unwrap();
                let parsed: SubjectId = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(id, parsed);
            }

            #[test]
            fn serializes_as_bare_number(n: u64) {
                let id = SubjectId(n);
                let json = serde_json::to_string(&id).unwrap();
                prop_assert_eq!(json, n.to_string());
            }

            #[test]
            fn comparison_matches_underlying(a: u64, b: u64) {
                let id_a = SubjectId(a);
                let id_b = SubjectId(b);
                prop_assert_eq!(id_a == id_b, a == b);
            }
        }
    }

    mod section_id {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serde_roundtrip(n: u64) {
                let id = SectionId(n);
                let json = serde_json::to_string(&id).unwrap();
                let parsed: SectionId = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(id, parsed);
            }

            #[test]
            fn display_format(n: u64) {
                let id = SectionId(n);
                prop_assert_eq!(format!("{}", id), n.to_string());
            }
        }
    }
}

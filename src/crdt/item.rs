//! Item: one replicated element of the document sequence
//!
//! Each item carries one character with:
//! - Unique ID
//! - Left/right origins for conflict resolution
//! - Deleted flag (tombstone)

use super::id::Id;
use super::version::VersionVector;
use serde::{Deserialize, Serialize};

/// A single element in the replicated sequence
///
/// The origins name the elements immediately left and right of the insertion
/// point at authoring time. Integration uses them to recompute the element's
/// position deterministically on every replica; `None` means the virtual
/// start (left) or virtual end (right) of the sequence.
///
/// Items are immutable once integrated, except `deleted`, which may
/// transition false→true exactly once and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this element
    pub id: Id,

    /// The character this element contributes to the visible text
    pub ch: char,

    /// Element immediately left of the insertion point (None = sequence start)
    pub origin_left: Option<Id>,

    /// Element immediately right of the insertion point (None = sequence end)
    pub origin_right: Option<Id>,

    /// Tombstone flag; deleted elements stay in the sequence to keep
    /// position references of dependent operations valid
    pub deleted: bool,
}

impl Item {
    /// Create a new (not yet integrated) element
    pub fn new(id: Id, ch: char, origin_left: Option<Id>, origin_right: Option<Id>) -> Self {
        Self {
            id,
            ch,
            origin_left,
            origin_right,
            deleted: false,
        }
    }

    /// Mark this element as deleted (tombstone)
    ///
    /// Idempotent; the flag never reverts.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Whether this element can be integrated against the given version
    ///
    /// True iff the element itself is not yet integrated, its per-agent
    /// predecessor is (FIFO), and both origins are. This is the gate the
    /// merge fixpoint loop checks before every integration attempt.
    pub fn can_integrate_now(&self, version: &VersionVector) -> bool {
        let predecessor_ok = match self.id.predecessor() {
            Some(prev) => version.contains(&prev),
            None => true,
        };

        !version.contains(&self.id)
            && predecessor_ok
            && version.contains_opt(self.origin_left.as_ref())
            && version.contains_opt(self.origin_right.as_ref())
    }
}

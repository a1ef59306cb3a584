//! Error types for textsync-core
//!
//! Every failure at this layer is unrecoverable in place: the core performs
//! no silent recovery, so each kind surfaces to the embedding system, which
//! decides whether to buffer, retry at its own boundary, or drop the input.

use crate::crdt::Id;
use thiserror::Error;

/// Unified error type for document operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextSyncError {
    /// An element arrived out of sequence for its agent.
    ///
    /// Integration never reorders or buffers; each agent's elements must be
    /// delivered with gapless increasing sequence numbers. A duplicate, a
    /// gap, or a replay all land here.
    #[error("out-of-order element from agent '{agent}': got seq {seq}, expected {expected}")]
    OutOfOrder {
        agent: String,
        seq: u64,
        expected: u64,
    },

    /// An element references an origin that has not been integrated.
    ///
    /// Signals that the caller delivered an element before its causal
    /// prerequisite. Single `remote_insert` calls fail hard; `merge_from`
    /// avoids this by checking dependencies before each attempt.
    #[error("missing dependency: element {0} is not in the document")]
    MissingDependency(Id),

    /// A visible offset exceeds the document's visible length.
    #[error("position {pos} is past the end of the document (visible length {visible_len})")]
    PastEndOfDocument { pos: usize, visible_len: usize },

    /// A merge pass integrated nothing while elements remain missing.
    ///
    /// Indicates a source document with a dependency that can never be
    /// resolved (malformed input), not a transient condition.
    #[error("merge made no progress with {remaining} element(s) still missing")]
    NoProgress { remaining: usize },
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, TextSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextSyncError::OutOfOrder {
            agent: "alice".to_string(),
            seq: 3,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "out-of-order element from agent 'alice': got seq 3, expected 1"
        );

        let err = TextSyncError::PastEndOfDocument {
            pos: 9,
            visible_len: 4,
        };
        assert!(err.to_string().contains("position 9"));
    }

    #[test]
    fn test_missing_dependency_names_the_id() {
        let err = TextSyncError::MissingDependency(Id::new("bob", 7));
        assert_eq!(
            err.to_string(),
            "missing dependency: element bob@7 is not in the document"
        );
    }
}

//! Element ID: unique identifier for inserted elements
//!
//! Each element in the document has an ID composed of:
//! - Agent: the replica that authored the element
//! - Seq: position in that agent's gapless operation sequence

use crate::AgentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for one inserted element
///
/// Per agent, `seq` values form a gapless increasing sequence starting at 0;
/// this is the causal delivery contract for that agent's own operations.
/// Concurrent insertions over an identical origin span are tie-broken by the
/// lexicographic order of their agent strings, which gives every replica the
/// same total order without any clock.
///
/// # Example
///
/// ```rust
/// use textsync_core::crdt::Id;
///
/// let id = Id::new("alice", 0);
/// assert_eq!(id.agent, "alice");
/// assert_eq!(id.seq, 0);
/// assert_eq!(id.to_string(), "alice@0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    /// Agent/replica that authored this element
    pub agent: AgentId,

    /// Position in the agent's own operation sequence (0-based, gapless)
    pub seq: u64,
}

impl Id {
    /// Create a new ID
    pub fn new(agent: impl Into<AgentId>, seq: u64) -> Self {
        Self {
            agent: agent.into(),
            seq,
        }
    }

    /// ID of the agent's immediately preceding operation, if any
    ///
    /// `None` for the agent's first operation (seq 0). Used to enforce
    /// per-agent FIFO delivery.
    pub fn predecessor(&self) -> Option<Id> {
        self.seq
            .checked_sub(1)
            .map(|seq| Id::new(self.agent.clone(), seq))
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.agent, self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        let id1 = Id::new("alice", 3);
        let id2 = Id::new("alice", 3);
        let id3 = Id::new("bob", 3);
        let id4 = Id::new("alice", 4);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_ne!(id1, id4);
    }

    #[test]
    fn test_predecessor() {
        assert_eq!(Id::new("alice", 5).predecessor(), Some(Id::new("alice", 4)));
        assert_eq!(Id::new("alice", 0).predecessor(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Id::new("seph", 42).to_string(), "seph@42");
    }

    #[test]
    fn test_serialization() {
        let id = Id::new("alice", 7);

        let json = serde_json::to_string(&id).unwrap();
        let deserialized: Id = serde_json::from_str(&json).unwrap();

        assert_eq!(id, deserialized);
    }
}

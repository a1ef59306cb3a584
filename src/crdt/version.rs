//! Version vector: per-agent progress tracking
//!
//! Each document owns one version vector recording, per agent, the highest
//! contiguous sequence number it has integrated. Absent agent = nothing
//! integrated. Entries are monotonically non-decreasing.

use super::id::Id;
use crate::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-agent highest contiguous sequence number integrated
///
/// The vector tracks *presence* of elements, not their deleted flags; merge
/// runs a separate delete-propagation pass for the latter.
///
/// # Example
///
/// ```rust
/// use textsync_core::crdt::{Id, VersionVector};
///
/// let mut version = VersionVector::new();
/// assert_eq!(version.next_seq("alice"), 0);
///
/// version.record(&Id::new("alice", 0));
/// assert!(version.contains(&Id::new("alice", 0)));
/// assert_eq!(version.next_seq("alice"), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionVector {
    seen: HashMap<AgentId, u64>,
}

impl VersionVector {
    /// Create an empty version vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest seq integrated for this agent, if any
    pub fn get(&self, agent: &str) -> Option<u64> {
        self.seen.get(agent).copied()
    }

    /// The seq the agent's next element must carry
    pub fn next_seq(&self, agent: &str) -> u64 {
        self.get(agent).map_or(0, |seq| seq + 1)
    }

    /// Whether this exact element has been integrated
    pub fn contains(&self, id: &Id) -> bool {
        self.get(&id.agent).map_or(false, |highest| highest >= id.seq)
    }

    /// `contains` lifted over an optional origin reference
    ///
    /// An absent origin is the "always satisfied" sentinel: it names the
    /// virtual start or end of the sequence, which every replica has.
    pub fn contains_opt(&self, id: Option<&Id>) -> bool {
        id.map_or(true, |id| self.contains(id))
    }

    /// Record an integrated element
    ///
    /// Never decreases an entry, so the vector stays monotonic even if a
    /// caller records out of order.
    pub fn record(&mut self, id: &Id) {
        let entry = self.seen.entry(id.agent.clone()).or_insert(id.seq);
        *entry = (*entry).max(id.seq);
    }

    /// Number of agents with at least one integrated element
    pub fn agent_count(&self) -> usize {
        self.seen.len()
    }

    /// Whether no element from any agent has been integrated
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vector() {
        let version = VersionVector::new();

        assert!(version.is_empty());
        assert_eq!(version.get("alice"), None);
        assert_eq!(version.next_seq("alice"), 0);
        assert!(!version.contains(&Id::new("alice", 0)));
    }

    #[test]
    fn test_record_and_contains() {
        let mut version = VersionVector::new();
        version.record(&Id::new("alice", 0));
        version.record(&Id::new("alice", 1));

        assert!(version.contains(&Id::new("alice", 0)));
        assert!(version.contains(&Id::new("alice", 1)));
        assert!(!version.contains(&Id::new("alice", 2)));
        assert!(!version.contains(&Id::new("bob", 0)));
        assert_eq!(version.next_seq("alice"), 2);
    }

    #[test]
    fn test_record_is_monotonic() {
        let mut version = VersionVector::new();
        version.record(&Id::new("alice", 5));
        version.record(&Id::new("alice", 2));

        assert_eq!(version.get("alice"), Some(5));
    }

    #[test]
    fn test_absent_origin_is_always_satisfied() {
        let version = VersionVector::new();

        assert!(version.contains_opt(None));
        assert!(!version.contains_opt(Some(&Id::new("alice", 0))));
    }

    #[test]
    fn test_serialization() {
        let mut version = VersionVector::new();
        version.record(&Id::new("alice", 3));
        version.record(&Id::new("bob", 0));

        let json = serde_json::to_string(&version).unwrap();
        let deserialized: VersionVector = serde_json::from_str(&json).unwrap();

        assert_eq!(version, deserialized);
    }
}

//! TextSync Core - replicated sequence engine for collaborative text
//!
//! Multiple independent replicas ("agents") may insert and delete
//! characters concurrently and without coordination; once they have
//! observed the same set of operations they deterministically converge to
//! identical content, regardless of delivery order. This crate implements:
//! - Element identifiers and per-agent version vectors
//! - The document model (tombstone-retaining sequence + version)
//! - Deterministic integration of local and remote insertions
//! - Bulk merge/reconciliation between documents
//!
//! Transport, persistence, and agent-id assignment belong to the embedding
//! system; the crate's types are serde-serializable so that system owns
//! framing.
//!
//! # Examples
//!
//! ```rust
//! use textsync_core::Document;
//!
//! let mut doc1 = Document::new();
//! let mut doc2 = Document::new();
//!
//! doc1.local_insert("alice", 0, "A").unwrap();
//! doc2.local_insert("bob", 0, "B").unwrap();
//!
//! doc1.merge_from(&doc2).unwrap();
//! doc2.merge_from(&doc1).unwrap();
//!
//! assert_eq!(doc1.content(), doc2.content());
//! ```

pub mod crdt;
pub mod error;

// Re-exports for convenience
pub use crdt::{Document, Id, Item, VersionVector};
pub use error::{Result, TextSyncError};

/// Agent (replica) identifier type
pub type AgentId = String;

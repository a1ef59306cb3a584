//! Replicated ordered-sequence CRDT for collaborative text
//!
//! An operation-based list CRDT in the Yjs/YATA family: every inserted
//! character is an element that names the elements left and right of its
//! insertion point, and every replica recomputes the same position for it
//! from those origins plus a fixed agent-identifier order. Deletions leave
//! tombstones so position references stay valid.
//!
//! # Module layout
//!
//! - [`id`] — element identifiers `(agent, seq)`
//! - [`version`] — per-agent version vector
//! - [`item`] — one element of the sequence
//! - [`doc`] — the document: sequence + version, position resolution,
//!   local edits
//! - `integrate` — deterministic placement of one new element
//! - `merge` — bulk reconciliation between two documents
//!
//! # References
//!
//! - "Near Real-Time Peer-to-Peer Shared Editing on Extensible Data Types"
//!   (YATA)
//! - "Conflict-free Replicated Data Types" (INRIA Research Report 7687)

pub mod doc;
pub mod id;
pub mod item;
pub mod version;

mod integrate;
mod merge;

pub use doc::Document;
pub use id::Id;
pub use item::Item;
pub use version::VersionVector;

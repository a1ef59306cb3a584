//! Document: the replicated sequence plus its version vector
//!
//! A document is the sole unit of replicated state: an ordered sequence of
//! items (tombstones included) and one version vector. Local edits and
//! remote deliveries both funnel through [`Document::integrate`]
//! (in `integrate.rs`); bulk catch-up goes through [`Document::merge_from`]
//! (in `merge.rs`).

use super::id::Id;
use super::item::Item;
use super::version::VersionVector;
use crate::error::{Result, TextSyncError};
use serde::{Deserialize, Serialize};

/// A replicated plain-text document
///
/// Growth is monotonic: elements are spliced in once by integration and
/// never move or leave; deletion only flips an element's tombstone flag.
///
/// Not internally synchronized. Integration reads and writes the sequence
/// and version vector non-atomically, so an embedding system must serialize
/// access per document before sharing one across threads.
///
/// # Example
///
/// ```rust
/// use textsync_core::Document;
///
/// let mut doc = Document::new();
/// doc.local_insert("alice", 0, "hi").unwrap();
///
/// assert_eq!(doc.content(), "hi");
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Integration-decided element order, tombstones retained
    pub(crate) items: Vec<Item>,

    /// Per-agent highest contiguous seq integrated
    pub(crate) version: VersionVector,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible text: non-deleted characters in sequence order
    pub fn content(&self) -> String {
        self.items
            .iter()
            .filter(|item| !item.deleted)
            .map(|item| item.ch)
            .collect()
    }

    /// Number of visible (non-deleted) characters
    pub fn len(&self) -> usize {
        self.items.iter().filter(|item| !item.deleted).count()
    }

    /// Whether the document has no visible characters
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(|item| item.deleted)
    }

    /// The full underlying sequence, tombstones included
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// This document's version vector
    pub fn version(&self) -> &VersionVector {
        &self.version
    }

    /// Look up an integrated element by ID
    ///
    /// The outer layer uses this to read back elements created by local
    /// edits before broadcasting them.
    pub fn item(&self, id: &Id) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Index of the element with the given ID
    pub(crate) fn index_of(&self, id: &Id) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == *id)
            .ok_or_else(|| TextSyncError::MissingDependency(id.clone()))
    }

    /// Map a visible character offset to an index in the underlying sequence
    ///
    /// Scans from the start, skipping tombstones. With `stick_to_start` set
    /// (insertion mode), offset 0 resolves to the first index scanned even
    /// if that index is itself a tombstone, so a fresh insertion binds
    /// before any run of tombstones at that visible position rather than
    /// after them. `pos == visible length` resolves to the one-past-the-end
    /// index; anything beyond fails.
    pub(crate) fn find_visible_index(&self, pos: usize, stick_to_start: bool) -> Result<usize> {
        let mut remaining = pos;
        for (i, item) in self.items.iter().enumerate() {
            if stick_to_start && remaining == 0 {
                return Ok(i);
            }
            if item.deleted {
                continue;
            }
            if remaining == 0 {
                return Ok(i);
            }
            remaining -= 1;
        }

        if remaining == 0 {
            Ok(self.items.len())
        } else {
            Err(TextSyncError::PastEndOfDocument {
                pos,
                visible_len: self.len(),
            })
        }
    }

    /// Insert text at a visible offset, one element per character
    ///
    /// Characters are inserted left to right, advancing the offset after
    /// each one so the text lands in its original order. Returns the IDs of
    /// the created elements, in text order, for the outer layer to
    /// broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`TextSyncError::PastEndOfDocument`] if `pos` exceeds the
    /// visible length.
    pub fn local_insert(&mut self, agent: &str, pos: usize, text: &str) -> Result<Vec<Id>> {
        let mut ids = Vec::new();
        let mut pos = pos;
        for ch in text.chars() {
            ids.push(self.local_insert_one(agent, pos, ch)?);
            pos += 1;
        }
        Ok(ids)
    }

    /// Insert a single character at a visible offset
    ///
    /// Builds a fully-formed element — next seq for the agent, origins
    /// taken from the elements adjacent to the resolved index — and hands
    /// it to integration.
    pub fn local_insert_one(&mut self, agent: &str, pos: usize, ch: char) -> Result<Id> {
        let idx = self.find_visible_index(pos, true)?;

        let id = Id::new(agent, self.version.next_seq(agent));
        let origin_left = idx
            .checked_sub(1)
            .map(|left_idx| self.items[left_idx].id.clone());
        let origin_right = self.items.get(idx).map(|item| item.id.clone());

        let item = Item::new(id.clone(), ch, origin_left, origin_right);
        self.integrate(item)?;
        Ok(id)
    }

    /// Delete `count` visible characters starting at a visible offset
    ///
    /// Tombstones the elements; nothing is removed from the sequence.
    /// Because deleted elements stop counting toward the offset, resolving
    /// the same `pos` each iteration deletes consecutive visible
    /// characters. Returns the IDs of the tombstoned elements.
    ///
    /// # Errors
    ///
    /// Returns [`TextSyncError::PastEndOfDocument`] if the range runs past
    /// the visible text. Elements deleted before the failure stay deleted.
    pub fn local_delete(&mut self, pos: usize, count: usize) -> Result<Vec<Id>> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = self.find_visible_index(pos, false)?;
            if idx == self.items.len() {
                // Offset resolved to the one-past-the-end slot; there is no
                // visible character left to delete there.
                return Err(TextSyncError::PastEndOfDocument {
                    pos,
                    visible_len: self.len(),
                });
            }
            let item = &mut self.items[idx];
            item.mark_deleted();
            ids.push(item.id.clone());
        }
        Ok(ids)
    }

    /// Integrate one fully-formed remote element
    ///
    /// The caller must ensure the element's causal dependencies are already
    /// integrated (its origins present, its per-agent predecessor
    /// delivered); there is no buffering here. For bulk catch-up with
    /// unknown ordering, use [`Document::merge_from`] instead.
    pub fn remote_insert(&mut self, item: Item) -> Result<()> {
        self.integrate(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::new();

        assert_eq!(doc.content(), "");
        assert_eq!(doc.len(), 0);
        assert!(doc.is_empty());
        assert!(doc.version().is_empty());
    }

    #[test]
    fn test_local_insert_and_content() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "hello").unwrap();

        assert_eq!(doc.content(), "hello");
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.items().len(), 5);
        assert_eq!(doc.version().get("alice"), Some(4));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "hd").unwrap();
        doc.local_insert("alice", 1, "ello worl").unwrap();

        assert_eq!(doc.content(), "hello world");
    }

    #[test]
    fn test_insert_past_end_fails() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "ab").unwrap();

        let err = doc.local_insert("alice", 5, "x").unwrap_err();
        assert_eq!(
            err,
            TextSyncError::PastEndOfDocument {
                pos: 5,
                visible_len: 2
            }
        );
    }

    #[test]
    fn test_local_delete() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "hello world").unwrap();
        doc.local_delete(5, 6).unwrap();

        assert_eq!(doc.content(), "hello");
        // Tombstones stay in the underlying sequence.
        assert_eq!(doc.items().len(), 11);
        assert_eq!(doc.len(), 5);
    }

    #[test]
    fn test_delete_then_insert_at_same_offset() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "abc").unwrap();
        doc.local_delete(1, 1).unwrap();
        doc.local_insert("alice", 1, "B").unwrap();

        assert_eq!(doc.content(), "aBc");
    }

    #[test]
    fn test_delete_past_end_fails() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "ab").unwrap();

        assert!(doc.local_delete(0, 3).is_err());
        // The two characters that existed were still tombstoned.
        assert_eq!(doc.content(), "");
    }

    #[test]
    fn test_item_lookup() {
        let mut doc = Document::new();
        let ids = doc.local_insert("alice", 0, "ab").unwrap();

        let item = doc.item(&ids[1]).unwrap();
        assert_eq!(item.ch, 'b');
        assert!(doc.item(&Id::new("bob", 0)).is_none());
    }

    #[test]
    fn test_document_serialization_round_trip() {
        let mut doc = Document::new();
        doc.local_insert("alice", 0, "hey").unwrap();
        doc.local_delete(1, 1).unwrap();

        let json = serde_json::to_string(&doc).unwrap();
        let deserialized: Document = serde_json::from_str(&json).unwrap();

        assert_eq!(doc, deserialized);
        assert_eq!(deserialized.content(), "hy");
    }
}

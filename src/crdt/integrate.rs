//! Integration: deterministic placement of one new element
//!
//! This is the algorithmic core of the crate. Given one new element (local
//! or remote) with its declared left/right origin context, integration
//! computes its final index in the shared sequence from structural facts
//! alone — the index positions of origins already in the document, plus the
//! fixed lexicographic order over agent identifiers. Any two replicas that
//! have integrated the same prior elements therefore compute the same index
//! for every element, which is what makes the sequences converge.

use super::doc::Document;
use super::item::Item;
use crate::error::{Result, TextSyncError};
use log::trace;

/// Scan state while walking the span between an element's origins
///
/// The scan defers (freezes the destination cursor) while it is inside a
/// nested overlap whose outcome it cannot decide yet, and advances the
/// cursor otherwise. Keeping this a named two-state machine instead of a
/// mutable flag makes the transitions below line up with the case analysis
/// one for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Destination cursor follows the scan position
    Advancing,
    /// Ambiguous nested overlap; cursor frozen at its last advanced value
    Deferring,
}

impl Document {
    /// Splice a new element into the sequence and update the version vector
    ///
    /// The element's seq must be exactly the next one for its agent;
    /// integration never reorders or buffers. Both origins must already be
    /// integrated. On success the element's position is permanent: no later
    /// operation moves it.
    ///
    /// # Errors
    ///
    /// - [`TextSyncError::OutOfOrder`] on a duplicate, gap, or replay in
    ///   the agent's sequence
    /// - [`TextSyncError::MissingDependency`] if an origin cannot be found
    pub(crate) fn integrate(&mut self, item: Item) -> Result<()> {
        let expected = self.version.next_seq(&item.id.agent);
        if item.id.seq != expected {
            return Err(TextSyncError::OutOfOrder {
                agent: item.id.agent.clone(),
                seq: item.id.seq,
                expected,
            });
        }
        self.version.record(&item.id);

        // Origin indices. None stands in for the virtual slot before the
        // sequence start (and Option's ordering makes None compare below
        // every real index); the sequence length stands in for the virtual
        // slot after the end.
        let left = match &item.origin_left {
            Some(id) => Some(self.index_of(id)?),
            None => None,
        };
        let right = match &item.origin_right {
            Some(id) => self.index_of(id)?,
            None => self.items.len(),
        };

        let start = left.map_or(0, |l| l + 1);
        let mut dest_idx = start;
        let mut scan = Scan::Advancing;

        // Walk the elements inside the (left, right) span. Everything in
        // here was inserted concurrently with the new element over some
        // part of the same context, so the new element's slot among them
        // has to be decided from origins and agent order alone.
        let mut i = start;
        loop {
            if scan == Scan::Advancing {
                dest_idx = i;
            }
            if i == self.items.len() || i == right {
                break;
            }

            let other = &self.items[i];
            let oleft = match &other.origin_left {
                Some(id) => Some(self.index_of(id)?),
                None => None,
            };
            let oright = match &other.origin_right {
                Some(id) => self.index_of(id)?,
                None => self.items.len(),
            };

            if oleft < left {
                // `other` lies strictly outside the new element's span;
                // everything from here on belongs after it.
                break;
            } else if oleft == left {
                if oright < right {
                    // Might end up inserting after `other`, can't tell yet.
                    scan = Scan::Deferring;
                } else if oright == right {
                    // Identical origin span: raw conflict, agent order decides.
                    if item.id.agent < other.id.agent {
                        break;
                    }
                    scan = Scan::Advancing;
                } else {
                    // `other` reaches past our right origin; skip over it.
                    scan = Scan::Advancing;
                }
            }
            // oleft > left: `other` is nested in an unrelated concurrent
            // region; keep scanning in whatever state we are in.

            i += 1;
        }

        trace!("integrate {} at index {}", item.id, dest_idx);
        self.items.insert(dest_idx, item);
        Ok(())
    }
}

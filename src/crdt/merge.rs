//! Merge: bulk reconciliation of two documents
//!
//! Brings one document up to date with every operation another document has
//! that it lacks. Dependency order among the missing elements is unknown to
//! the caller, so merge resolves it with a bounded fixpoint loop: repeated
//! passes over the missing set, integrating whatever has become eligible,
//! until nothing remains. A final pass propagates delete flags, which the
//! version vector (tracking presence only) cannot catch.

use super::doc::Document;
use super::item::Item;
use crate::error::{Result, TextSyncError};
use log::debug;

impl Document {
    /// Integrate everything `src` has that this document lacks
    ///
    /// Respects causal order via the fixpoint loop, then reconciles delete
    /// flags. Idempotent: merging a source with nothing new does no work.
    /// The loop terminates after at most `missing.len()` passes, since each
    /// pass must integrate at least one element to continue.
    ///
    /// # Errors
    ///
    /// Returns [`TextSyncError::NoProgress`] if a full pass integrates
    /// nothing while elements remain missing. That cannot happen for a
    /// legally constructed `src` (every element's dependencies precede it
    /// in any valid document); it signals malformed input, not a transient
    /// condition.
    pub fn merge_from(&mut self, src: &Document) -> Result<()> {
        let mut missing: Vec<Option<&Item>> = src
            .items
            .iter()
            .filter(|item| !self.version.contains(&item.id))
            .map(Some)
            .collect();
        let mut remaining = missing.len();
        debug!("merge: {} element(s) missing", remaining);

        while remaining > 0 {
            let mut merged_this_pass = 0;

            for slot in missing.iter_mut() {
                let Some(item) = slot else { continue };
                if !item.can_integrate_now(&self.version) {
                    continue;
                }

                self.remote_insert((*item).clone())?;
                *slot = None;
                remaining -= 1;
                merged_this_pass += 1;
            }

            if merged_this_pass == 0 {
                return Err(TextSyncError::NoProgress { remaining });
            }
        }

        self.propagate_deletes(src)
    }

    /// Copy delete flags from `src` onto matching local elements
    ///
    /// Walks both sequences in parallel, matching by ID. Sound because
    /// after the fixpoint loop every `src` element exists here, and two
    /// documents that have integrated the same elements order them
    /// identically, so `src`'s sequence is a subsequence of this one.
    /// Idempotent; never unsets a flag.
    fn propagate_deletes(&mut self, src: &Document) -> Result<()> {
        let mut dest_idx = 0;
        for src_item in &src.items {
            while self
                .items
                .get(dest_idx)
                .map_or(false, |dest_item| dest_item.id != src_item.id)
            {
                dest_idx += 1;
            }
            let dest_item = self
                .items
                .get_mut(dest_idx)
                .ok_or_else(|| TextSyncError::MissingDependency(src_item.id.clone()))?;

            if src_item.deleted {
                dest_item.mark_deleted();
            }
            dest_idx += 1;
        }
        Ok(())
    }
}

//! Locate the highest checkpoint already present in the block index.
//!
//! The result is the floor height: the deepest point a rewind or reorg can
//! safely fall back to. Tables hold tens of pins, so a linear scan from the
//! top is all this needs.

use tollgate_core::traits::BlockIndex;
use tracing::debug;

use crate::table::CheckpointTable;

/// Scan `table` from the highest pin down and return the handle of the first
/// pinned hash found in `index`.
///
/// Returns `None` for an empty table or when no pinned hash is indexed.
pub fn highest_known_checkpoint<I: BlockIndex + ?Sized>(
    table: &CheckpointTable,
    index: &I,
) -> Option<I::Handle> {
    for (height, hash) in table.iter_desc() {
        if let Some(handle) = index.lookup(hash) {
            debug!(height, %hash, "checkpoint: highest known checkpoint");
            return Some(handle);
        }
    }
    debug!(pins = table.len(), "checkpoint: no pinned block in index");
    None
}

//! Checkpoint enforcement with an operator on/off switch.
//!
//! The node should call [`CheckpointGuard::check_block`] (or
//! [`is_block_allowed`](CheckpointGuard::is_block_allowed)) when connecting a
//! block whose height is known, and [`CheckpointGuard::is_below_checkpoint`]
//! before accepting a reorg that would disconnect blocks at or below the last
//! checkpoint.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** without checkpoints an attacker with enough hash
//!   power could rewrite arbitrarily deep history. A pinned block cannot be
//!   replaced, and the last pin is a floor no reorg may cross.
//!
//! - **Checkpoint spoofing:** the tables are compiled into the binary; an
//!   attacker would need to distribute a modified binary.
//!
//! Disabling the guard is an operational convenience. It never makes a
//! query fail; every query degrades to its permissive answer instead.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tollgate_core::error::CheckpointError;
use tollgate_core::traits::BlockIndex;
use tollgate_core::types::Hash256;
use tracing::{info, warn};

use crate::locator;
use crate::selector::NetworkSelector;
use crate::table::CheckpointTable;

/// Enforces the active checkpoint table.
///
/// Share it behind an `Arc`; the enabled flag is atomic, and the tables
/// behind the selector are immutable.
pub struct CheckpointGuard {
    selector: Arc<dyn NetworkSelector>,
    enabled: AtomicBool,
}

impl fmt::Debug for CheckpointGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckpointGuard")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl CheckpointGuard {
    /// Create an enabled guard.
    pub fn new(selector: Arc<dyn NetworkSelector>) -> Self {
        Self {
            selector,
            enabled: AtomicBool::new(true),
        }
    }

    /// Set the initial enabled state.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.store(enabled, Ordering::Relaxed);
        self
    }

    /// The selector this guard consults.
    pub fn selector(&self) -> Arc<dyn NetworkSelector> {
        Arc::clone(&self.selector)
    }

    /// The currently active table.
    pub fn active_table(&self) -> &CheckpointTable {
        self.selector.active_table()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turn checkpoint enforcement on or off for every later call.
    pub fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::Relaxed);
        if was != enabled {
            info!(enabled, "checkpoint: enforcement toggled");
        }
    }

    /// Verify that a block at `height` has the checkpointed hash.
    ///
    /// Succeeds when the guard is disabled or nothing is pinned at `height`.
    ///
    /// # Errors
    ///
    /// [`CheckpointError::Mismatch`] when the hash differs from the pin.
    pub fn check_block(&self, height: u64, hash: &Hash256) -> Result<(), CheckpointError> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.active_table().check(height, hash).inspect_err(|e| {
            warn!(height, %hash, error = %e, "checkpoint: block rejected");
        })
    }

    /// Boolean form of [`check_block`](Self::check_block).
    pub fn is_block_allowed(&self, height: u64, hash: &Hash256) -> bool {
        self.check_block(height, hash).is_ok()
    }

    /// Height of the last checkpoint, the floor believed already validated.
    ///
    /// Returns `Ok(0)` when the guard is disabled.
    ///
    /// # Errors
    ///
    /// [`CheckpointError::EmptyTable`] when enabled and the active table has
    /// no pins. Callers should read that as "no estimate available".
    pub fn try_total_blocks_estimate(&self) -> Result<u64, CheckpointError> {
        if !self.is_enabled() {
            return Ok(0);
        }
        self.active_table()
            .last_height()
            .ok_or(CheckpointError::EmptyTable)
    }

    /// Like [`try_total_blocks_estimate`](Self::try_total_blocks_estimate),
    /// with an empty table reported as 0.
    pub fn total_blocks_estimate(&self) -> u64 {
        self.try_total_blocks_estimate().unwrap_or(0)
    }

    /// Returns `true` if `height` is at or below the last checkpoint height.
    ///
    /// A pin at height 0 alone does not make genesis a floor. Always `false`
    /// while disabled.
    pub fn is_below_checkpoint(&self, height: u64) -> bool {
        let last = self.total_blocks_estimate();
        last > 0 && height <= last
    }

    /// The handle of the highest checkpointed block present in `index`.
    ///
    /// `None` when disabled or when no pinned hash is indexed.
    pub fn last_checkpoint<I: BlockIndex + ?Sized>(&self, index: &I) -> Option<I::Handle> {
        if !self.is_enabled() {
            return None;
        }
        locator::highest_known_checkpoint(self.active_table(), index)
    }
}

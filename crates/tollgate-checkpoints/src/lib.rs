//! # tollgate-checkpoints: Checkpoint-based chain-integrity guard.
//!
//! A small, trusted set of `(height, block hash)` pins per network is used to:
//! - reject a block at a pinned height whose hash differs ([`CheckpointGuard`]),
//! - estimate initial-sync verification progress ([`ProgressEstimator`]),
//! - report the last checkpointed height as a total-blocks estimate,
//! - find the highest checkpoint already in the block index, a safe
//!   rewind floor ([`CheckpointGuard::last_checkpoint`]).
//!
//! Tables are immutable after construction. The only shared mutable state is
//! the guard's enabled flag, which is atomic.

pub mod config;
pub mod guard;
pub mod locator;
pub mod params;
pub mod progress;
pub mod selector;
pub mod table;

pub use crate::config::CheckpointConfig;
pub use guard::CheckpointGuard;
pub use locator::highest_known_checkpoint;
pub use progress::{guess_verification_progress, ProgressEstimator};
pub use selector::{ChainSelector, CheckpointTables, NetworkSelector};
pub use table::{CheckpointStats, CheckpointTable};

//! Trait interfaces for the collaborators the checkpoint core reads from.
//!
//! - [`BlockRecord`]: a block's height, cumulative tx count, and timestamp
//! - [`BlockIndex`]: the node's hash-keyed index of known blocks
//! - [`NetworkProvider`]: the source of the active network identifier
//!
//! The core never constructs or retains any of these beyond a single call.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::constants::NetworkType;
use crate::types::Hash256;

/// Read-only view of a block-index entry.
pub trait BlockRecord {
    /// Height of the block.
    fn height(&self) -> u64;

    /// Cumulative number of transactions from genesis up to and including this block.
    fn chain_tx_count(&self) -> u64;

    /// Block timestamp (Unix seconds).
    fn timestamp(&self) -> u64;
}

impl<T: BlockRecord + ?Sized> BlockRecord for &T {
    fn height(&self) -> u64 {
        (**self).height()
    }

    fn chain_tx_count(&self) -> u64 {
        (**self).chain_tx_count()
    }

    fn timestamp(&self) -> u64 {
        (**self).timestamp()
    }
}

impl<T: BlockRecord + ?Sized> BlockRecord for Arc<T> {
    fn height(&self) -> u64 {
        (**self).height()
    }

    fn chain_tx_count(&self) -> u64 {
        (**self).chain_tx_count()
    }

    fn timestamp(&self) -> u64 {
        (**self).timestamp()
    }
}

/// A mapping from block hash to an opaque handle for that block.
///
/// Implemented for the standard map types so a node can pass its index
/// straight in. Handles are returned by value; use a cheap-to-clone handle
/// (a reference, an `Arc`, or an id) for large entries.
pub trait BlockIndex {
    /// The handle returned for a known block.
    type Handle;

    /// Look up a block by hash. Returns `None` if the block is not indexed.
    fn lookup(&self, hash: &Hash256) -> Option<Self::Handle>;
}

impl<H: Clone, S: BuildHasher> BlockIndex for HashMap<Hash256, H, S> {
    type Handle = H;

    fn lookup(&self, hash: &Hash256) -> Option<H> {
        self.get(hash).cloned()
    }
}

impl<H: Clone> BlockIndex for BTreeMap<Hash256, H> {
    type Handle = H;

    fn lookup(&self, hash: &Hash256) -> Option<H> {
        self.get(hash).cloned()
    }
}

/// Source of the network the node is currently running on.
///
/// Queried once per top-level checkpoint operation.
pub trait NetworkProvider: Send + Sync {
    /// The active network.
    fn network(&self) -> NetworkType;
}

/// A fixed network is its own provider.
impl NetworkProvider for NetworkType {
    fn network(&self) -> NetworkType {
        *self
    }
}

impl<P: NetworkProvider + ?Sized> NetworkProvider for Arc<P> {
    fn network(&self) -> NetworkType {
        (**self).network()
    }
}

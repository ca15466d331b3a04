//! Shared fixtures for the scenario and property tests.

use std::collections::HashMap;
use std::sync::Arc;

use tollgate_checkpoints::{CheckpointStats, CheckpointTable, CheckpointTables, ChainSelector};
use tollgate_core::constants::NetworkType;
use tollgate_core::types::{BlockSummary, Hash256};

/// Timestamp of the last checkpoint in [`mainnet_like`].
pub const T: u64 = 1_600_000_000;

/// One day in seconds.
pub const DAY: u64 = 86_400;

/// Deterministic pin hash for a height.
pub fn pin(height: u64) -> Hash256 {
    let mut bytes = [0xC0u8; 32];
    bytes[24..].copy_from_slice(&height.to_be_bytes());
    Hash256(bytes)
}

/// Pins at 0, 100 and 1000; 500 transactions up to the last one, 100 per day
/// after it, last checkpoint at [`T`].
pub fn mainnet_like() -> CheckpointTable {
    CheckpointTable::from_list(
        [0u64, 100, 1000].map(|h| (h, pin(h))),
        CheckpointStats::new(T, 500, 100.0),
    )
    .expect("fixture pins are unique")
}

/// A testnet-like table with a single genesis pin.
pub fn testnet_like() -> CheckpointTable {
    CheckpointTable::from_list([(0, Hash256([0x7E; 32]))], CheckpointStats::new(T, 0, 50.0))
        .expect("fixture pins are unique")
}

/// Mainnet-like, testnet-like and an empty regtest table.
pub fn tables() -> Arc<CheckpointTables> {
    Arc::new(CheckpointTables::new(
        mainnet_like(),
        testnet_like(),
        CheckpointTable::empty(CheckpointStats::ZERO),
    ))
}

/// Selector over [`tables`] fixed to `network`.
pub fn selector(network: NetworkType) -> Arc<ChainSelector> {
    Arc::new(ChainSelector::new(tables(), network))
}

pub fn block(height: u64, chain_tx_count: u64, timestamp: u64) -> BlockSummary {
    BlockSummary { height, chain_tx_count, timestamp }
}

/// A block index holding the given pinned heights plus some unpinned noise.
pub fn index_with(heights: &[u64]) -> HashMap<Hash256, Arc<BlockSummary>> {
    let mut index: HashMap<Hash256, Arc<BlockSummary>> = heights
        .iter()
        .map(|&h| (pin(h), Arc::new(block(h, h, T))))
        .collect();
    for h in [1u64, 2, 3, 999, 5000] {
        index.insert(Hash256([h as u8; 32]), Arc::new(block(h, h, T)));
    }
    index
}

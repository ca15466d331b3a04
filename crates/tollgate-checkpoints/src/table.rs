//! Per-network checkpoint tables.
//!
//! A [`CheckpointTable`] pins a sparse set of heights to the block hash the
//! canonical chain must have there, and carries the chain statistics as of
//! the highest pin. Tables are built once and never mutated afterwards, so
//! they can be shared between threads without synchronization.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tollgate_core::error::CheckpointError;
use tollgate_core::types::Hash256;

/// Chain statistics as of the last checkpoint.
///
/// Used only by the progress estimator to extrapolate past the last pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CheckpointStats {
    /// Unix timestamp (seconds) of the block at the highest pinned height.
    pub last_checkpoint_time: u64,
    /// Cumulative transaction count up to and including the highest pinned height.
    pub last_checkpoint_tx_count: u64,
    /// Estimated transactions per day after the last checkpoint.
    pub tx_per_day: f64,
}

impl CheckpointStats {
    /// All-zero statistics, used by regtest and by parsed tables.
    pub const ZERO: Self = Self {
        last_checkpoint_time: 0,
        last_checkpoint_tx_count: 0,
        tx_per_day: 0.0,
    };

    pub const fn new(last_checkpoint_time: u64, last_checkpoint_tx_count: u64, tx_per_day: f64) -> Self {
        Self {
            last_checkpoint_time,
            last_checkpoint_tx_count,
            tx_per_day,
        }
    }
}

/// An immutable height → hash mapping plus [`CheckpointStats`].
///
/// Heights are unique. Lookups never depend on insertion order; the
/// "last"/"highest" queries always select the maximum height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckpointTable {
    pins: BTreeMap<u64, Hash256>,
    stats: CheckpointStats,
}

impl CheckpointTable {
    /// An empty table: every height is unconstrained.
    pub fn empty(stats: CheckpointStats) -> Self {
        Self {
            pins: BTreeMap::new(),
            stats,
        }
    }

    /// Build a table from compiled-in pins.
    ///
    /// Intended for known-good static data. A repeated height keeps the last
    /// hash given for it; use [`from_list`](Self::from_list) for data that
    /// needs validating.
    pub fn from_static(pins: &[(u64, [u8; 32])], stats: CheckpointStats) -> Self {
        Self {
            pins: pins.iter().map(|&(h, hash)| (h, Hash256(hash))).collect(),
            stats,
        }
    }

    /// Build a table from injected pins, rejecting duplicate heights and
    /// duplicate hashes.
    ///
    /// # Errors
    ///
    /// [`CheckpointError::DuplicateHeight`] or [`CheckpointError::DuplicateHash`]
    /// on the first repeat found. A repeated height is reported even when the
    /// hash repeats too.
    pub fn from_list(
        pins: impl IntoIterator<Item = (u64, Hash256)>,
        stats: CheckpointStats,
    ) -> Result<Self, CheckpointError> {
        let mut map = BTreeMap::new();
        let mut seen = HashSet::new();
        for (height, hash) in pins {
            if map.insert(height, hash).is_some() {
                return Err(CheckpointError::DuplicateHeight(height));
            }
            if !seen.insert(hash) {
                return Err(CheckpointError::DuplicateHash(hash));
            }
        }
        Ok(Self { pins: map, stats })
    }

    /// Replace the statistics, keeping the pins.
    pub fn with_stats(mut self, stats: CheckpointStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &CheckpointStats {
        &self.stats
    }

    /// The pinned hash at `height`, if any.
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.pins.get(&height)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// The highest pin.
    pub fn last(&self) -> Option<(u64, Hash256)> {
        self.pins.last_key_value().map(|(h, hash)| (*h, *hash))
    }

    /// The highest pinned height.
    pub fn last_height(&self) -> Option<u64> {
        self.pins.keys().next_back().copied()
    }

    /// Pins in ascending height order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u64, &Hash256)> + '_ {
        self.pins.iter().map(|(h, hash)| (*h, hash))
    }

    /// Pins in descending height order.
    pub fn iter_desc(&self) -> impl Iterator<Item = (u64, &Hash256)> + '_ {
        self.iter().rev()
    }

    /// Verify that a block at `height` has the pinned hash.
    ///
    /// Succeeds unconditionally when nothing is pinned at `height`.
    ///
    /// # Errors
    ///
    /// [`CheckpointError::Mismatch`] when the hash differs from the pin.
    pub fn check(&self, height: u64, hash: &Hash256) -> Result<(), CheckpointError> {
        match self.pins.get(&height) {
            Some(expected) if expected != hash => Err(CheckpointError::Mismatch {
                height,
                expected: *expected,
                got: *hash,
            }),
            _ => Ok(()),
        }
    }
}

impl FromStr for CheckpointTable {
    type Err = CheckpointError;

    /// Parse one `<height> <hex-hash>` pin per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. The parsed table
    /// has [`CheckpointStats::ZERO`]; attach real statistics with
    /// [`with_stats`](CheckpointTable::with_stats).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pins = Vec::new();
        for (idx, raw) in s.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = text.split_whitespace().collect();
            let [height, hash] = fields[..] else {
                return Err(CheckpointError::InvalidLine {
                    line,
                    reason: format!("expected 2 fields, found {}", fields.len()),
                });
            };
            let height = height.parse::<u64>().map_err(|e| CheckpointError::InvalidLine {
                line,
                reason: format!("height: {e}"),
            })?;
            let hash = Hash256::from_hex(hash).map_err(|e| CheckpointError::InvalidLine {
                line,
                reason: format!("hash: {e}"),
            })?;
            pins.push((height, hash));
        }
        Self::from_list(pins, CheckpointStats::ZERO)
    }
}

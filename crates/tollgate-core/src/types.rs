//! Core value types: block hashes and block summaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HashParseError;
use crate::traits::BlockRecord;

/// A 32-byte block hash.
///
/// Bytes are kept in display order: the hex string a block explorer shows
/// is exactly `hex::encode(hash.0)`. Only equality matters to checkpoint
/// logic, so no byte reversal happens anywhere.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a hex string, with or without a `0x` prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use tollgate_core::types::Hash256;
    /// let h = Hash256::from_hex(&format!("0x{}", "ab".repeat(32))).unwrap();
    /// assert_eq!(h, Hash256([0xAB; 32]));
    /// assert!(Hash256::from_hex("abcd").is_err());
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        let s = s.trim();
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| HashParseError::InvalidLength { got: bytes.len() })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// The three block fields the checkpoint core reads.
///
/// A plain carrier for callers (and tests) that do not have their own
/// block-index entry type at hand.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BlockSummary {
    /// Height of the block in the chain.
    pub height: u64,
    /// Cumulative number of transactions from genesis up to and including this block.
    pub chain_tx_count: u64,
    /// Block timestamp (Unix seconds).
    pub timestamp: u64,
}

impl BlockRecord for BlockSummary {
    fn height(&self) -> u64 {
        self.height
    }

    fn chain_tx_count(&self) -> u64 {
        self.chain_tx_count
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

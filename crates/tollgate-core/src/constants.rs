//! Protocol constants and the network identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How many times more expensive a transaction after the last checkpoint is
/// to verify than one before it.
///
/// This is a compromise that cannot be accurate for every system. Reindexing
/// from a fast disk with a slow CPU can be up to 20x slower, while downloading
/// over a slow network on a fast multicore CPU is barely slower at all.
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// Seconds in one day, used to extrapolate transaction throughput.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Network type: Mainnet, Testnet, or Regtest.
///
/// Selects which checkpoint table is active. Tables for different networks
/// are disjoint and never merged.
///
/// # Examples
///
/// ```
/// use tollgate_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert_eq!(net.as_str(), "mainnet");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
    /// Local regression-test network. Also the fallback for unknown identifiers.
    Regtest,
}

impl NetworkType {
    /// All networks, in declaration order.
    pub const ALL: [NetworkType; 3] = [Self::Mainnet, Self::Testnet, Self::Regtest];

    /// Resolve a network identifier.
    ///
    /// Accepts `main`/`mainnet`, `test`/`testnet` and `regtest`, ignoring case
    /// and surrounding whitespace. Anything else maps to [`NetworkType::Regtest`],
    /// the most permissive table; this never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tollgate_core::constants::NetworkType;
    /// assert_eq!(NetworkType::from_id("main"), NetworkType::Mainnet);
    /// assert_eq!(NetworkType::from_id("TestNet"), NetworkType::Testnet);
    /// assert_eq!(NetworkType::from_id("signet"), NetworkType::Regtest);
    /// ```
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Self::Mainnet,
            "test" | "testnet" => Self::Testnet,
            "regtest" => Self::Regtest,
            other => {
                warn!(network = other, "unrecognized network identifier, falling back to regtest");
                Self::Regtest
            }
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NetworkType {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl From<&str> for NetworkType {
    fn from(id: &str) -> Self {
        Self::from_id(id)
    }
}

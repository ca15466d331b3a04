//! Active-table selection.
//!
//! [`CheckpointTables`] holds one pre-built table per network. A
//! [`NetworkSelector`] resolves which of them is active; the production
//! implementation, [`ChainSelector`], asks a [`NetworkProvider`] for the
//! current network on every call. Tests can use a bare [`CheckpointTable`]
//! as a selector to run against synthetic data.

use std::fmt;
use std::sync::{Arc, LazyLock};

use tollgate_core::constants::NetworkType;
use tollgate_core::traits::NetworkProvider;

use crate::params;
use crate::table::CheckpointTable;

static BUILTIN: LazyLock<Arc<CheckpointTables>> = LazyLock::new(|| {
    Arc::new(CheckpointTables::new(
        params::mainnet(),
        params::testnet(),
        params::regtest(),
    ))
});

/// Resolves the checkpoint table for the active network.
pub trait NetworkSelector: Send + Sync {
    /// The table every checkpoint query should consult right now.
    fn active_table(&self) -> &CheckpointTable;
}

/// A single table is always active.
impl NetworkSelector for CheckpointTable {
    fn active_table(&self) -> &CheckpointTable {
        self
    }
}

impl<S: NetworkSelector + ?Sized> NetworkSelector for Arc<S> {
    fn active_table(&self) -> &CheckpointTable {
        (**self).active_table()
    }
}

/// One immutable table per network.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointTables {
    mainnet: CheckpointTable,
    testnet: CheckpointTable,
    regtest: CheckpointTable,
}

impl CheckpointTables {
    pub fn new(mainnet: CheckpointTable, testnet: CheckpointTable, regtest: CheckpointTable) -> Self {
        Self {
            mainnet,
            testnet,
            regtest,
        }
    }

    /// The compiled-in tables from [`params`], built on first use.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// The table for `network`.
    pub fn for_network(&self, network: NetworkType) -> &CheckpointTable {
        match network {
            NetworkType::Mainnet => &self.mainnet,
            NetworkType::Testnet => &self.testnet,
            NetworkType::Regtest => &self.regtest,
        }
    }

    /// The table for a raw network identifier.
    ///
    /// Unrecognized identifiers resolve to the regtest table.
    pub fn for_id(&self, id: &str) -> &CheckpointTable {
        self.for_network(NetworkType::from_id(id))
    }
}

/// Selects from a [`CheckpointTables`] set using a [`NetworkProvider`].
pub struct ChainSelector<P = NetworkType> {
    tables: Arc<CheckpointTables>,
    provider: P,
}

impl<P> fmt::Debug for ChainSelector<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainSelector").finish_non_exhaustive()
    }
}

impl<P: NetworkProvider> ChainSelector<P> {
    pub fn new(tables: Arc<CheckpointTables>, provider: P) -> Self {
        Self { tables, provider }
    }

    /// Select from the compiled-in tables.
    pub fn builtin(provider: P) -> Self {
        Self::new(CheckpointTables::builtin(), provider)
    }

    /// The network the provider currently reports.
    pub fn network(&self) -> NetworkType {
        self.provider.network()
    }
}

impl<P: NetworkProvider> NetworkSelector for ChainSelector<P> {
    fn active_table(&self) -> &CheckpointTable {
        self.tables.for_network(self.provider.network())
    }
}

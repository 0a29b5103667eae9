use crate::ChainHeaderReader;
use alloy_primitives::{B256, U256};
use forkline_hardforks::ChainConfig;
use forkline_storage::{ChainStoreReader, KeyValueStore, SealedHeader};
use tracing::warn;

/// A [`ChainHeaderReader`] over a [`KeyValueStore`] holding the chain schema.
///
/// Storage failures are logged and reported as missing entries.
#[derive(Debug)]
pub struct StoreChainReader<DB> {
    db: DB,
    config: ChainConfig,
    deep_reorg_protection: bool,
}

impl<DB: KeyValueStore> StoreChainReader<DB> {
    /// Creates a reader with deep-reorg protection enabled.
    pub const fn new(db: DB, config: ChainConfig) -> Self {
        Self { db, config, deep_reorg_protection: true }
    }

    /// Enables or disables deep-reorg protection.
    pub const fn with_deep_reorg_protection(mut self, enabled: bool) -> Self {
        self.deep_reorg_protection = enabled;
        self
    }

    /// Returns the underlying store.
    pub const fn db(&self) -> &DB {
        &self.db
    }
}

impl<DB: KeyValueStore> ChainHeaderReader for StoreChainReader<DB> {
    fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn header(&self, hash: B256, number: u64) -> Option<SealedHeader> {
        self.db.read_sealed_header(hash, number).unwrap_or_else(|err| {
            warn!(target: "forkchoice", %hash, number, %err, "Failed to read header");
            None
        })
    }

    fn total_difficulty(&self, hash: B256, number: u64) -> Option<U256> {
        self.db.read_td(hash, number).unwrap_or_else(|err| {
            warn!(target: "forkchoice", %hash, number, %err, "Failed to read total difficulty");
            None
        })
    }

    fn deep_reorg_protection_enabled(&self) -> bool {
        self.deep_reorg_protection
    }
}

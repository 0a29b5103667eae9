//! The genesis specification and the block derived from it.

use crate::{GenesisAlloc, state_root};
use alloy_consensus::Header;
use alloy_primitives::{Address, B64, B256, Bytes, U256, bytes};
use alloy_trie::EMPTY_ROOT_HASH;
use forkline_hardforks::{ChainConfig, ForkSchedule};
use forkline_storage::{SealedHeader, StoredBody};
use serde::{Deserialize, Serialize};

/// Gas limit of a genesis block that does not specify one.
pub const GENESIS_GAS_LIMIT: u64 = 5_000;

/// Difficulty of a genesis block that does not specify one.
pub const GENESIS_DIFFICULTY: U256 = U256::from_limbs([131_072, 0, 0, 0]);

/// Base fee of a London genesis block that does not specify one.
pub const INITIAL_BASE_FEE: u64 = 1_000_000_000;

/// A genesis specification, in the JSON layout of geth's `genesis.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genesis {
    /// The fork schedule. Required by [`setup_genesis_block`](crate::setup_genesis_block).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ChainConfig>,
    /// Proof-of-work nonce.
    #[serde(default, with = "alloy_serde::quantity")]
    pub nonce: u64,
    /// Block timestamp.
    #[serde(default, with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// Extra data. Holds the initial signers on Clique chains.
    #[serde(default)]
    pub extra_data: Bytes,
    /// Gas limit, [`GENESIS_GAS_LIMIT`] when zero.
    #[serde(default, with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// Difficulty, [`GENESIS_DIFFICULTY`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<U256>,
    /// Proof-of-work mix digest.
    #[serde(default)]
    pub mix_hash: B256,
    /// Beneficiary of the block.
    #[serde(default)]
    pub coinbase: Address,
    /// Initial account state.
    #[serde(default)]
    pub alloc: GenesisAlloc,
    /// Block number. Anything but zero is rejected on commit.
    #[serde(default, with = "alloy_serde::quantity")]
    pub number: u64,
    /// Gas used.
    #[serde(default, with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// Parent hash.
    #[serde(default)]
    pub parent_hash: B256,
    /// Base fee, used when London is active at genesis.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "alloy_serde::quantity::opt")]
    pub base_fee_per_gas: Option<u64>,
    /// Excess blob gas, used when Cancun is active at genesis.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "alloy_serde::quantity::opt")]
    pub excess_blob_gas: Option<u64>,
    /// Blob gas used, used when Cancun is active at genesis.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "alloy_serde::quantity::opt")]
    pub blob_gas_used: Option<u64>,
}

impl Genesis {
    /// The Ethereum mainnet genesis header seeds with the mainnet schedule and the given
    /// allocation.
    ///
    /// The allocation is not bundled. The derived block hashes to
    /// [`MAINNET_GENESIS_HASH`](forkline_hardforks::MAINNET_GENESIS_HASH) only when `alloc` is the
    /// mainnet allocation.
    pub fn mainnet(alloc: GenesisAlloc) -> Self {
        Self {
            config: Some(ChainConfig::mainnet()),
            alloc,
            nonce: 66,
            extra_data: bytes!("11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa"),
            gas_limit: 5_000,
            difficulty: Some(U256::from(17_179_869_184u64)),
            ..Default::default()
        }
    }

    /// A config-less genesis funding `address` with `balance` wei.
    pub fn for_testing(address: Address, balance: U256) -> Self {
        Self {
            alloc: GenesisAlloc::from([(address, crate::GenesisAccount::with_balance(balance))]),
            base_fee_per_gas: Some(INITIAL_BASE_FEE),
            ..Default::default()
        }
    }

    /// Returns the state root of the allocation.
    pub fn state_root(&self) -> B256 {
        state_root(&self.alloc)
    }

    /// Derives the genesis header.
    ///
    /// Fork-gated fields are only set if the fork is active at the genesis number and timestamp
    /// under [`Self::config`]; without a config none of them are set.
    pub fn to_header(&self) -> Header {
        let mut header = Header {
            parent_hash: self.parent_hash,
            beneficiary: self.coinbase,
            state_root: self.state_root(),
            difficulty: self.difficulty.unwrap_or(GENESIS_DIFFICULTY),
            number: self.number,
            gas_limit: if self.gas_limit == 0 { GENESIS_GAS_LIMIT } else { self.gas_limit },
            gas_used: self.gas_used,
            timestamp: self.timestamp,
            extra_data: self.extra_data.clone(),
            mix_hash: self.mix_hash,
            nonce: B64::new(self.nonce.to_be_bytes()),
            ..Default::default()
        };

        let Some(config) = self.config.as_ref() else { return header };
        if config.is_london_active_at_block(self.number) {
            header.base_fee_per_gas = Some(self.base_fee_per_gas.unwrap_or(INITIAL_BASE_FEE));
        }
        if config.is_shanghai_active(self.number, self.timestamp) {
            header.withdrawals_root = Some(EMPTY_ROOT_HASH);
        }
        if config.is_cancun_active_at_timestamp(self.timestamp) {
            header.excess_blob_gas = Some(self.excess_blob_gas.unwrap_or_default());
            header.blob_gas_used = Some(self.blob_gas_used.unwrap_or_default());
        }
        header
    }

    /// Derives the genesis block.
    pub fn to_block(&self) -> GenesisBlock {
        let header = SealedHeader::seal_slow(self.to_header());
        let withdrawals = header.withdrawals_root.map(|_| Vec::new());
        GenesisBlock { header, body: StoredBody { withdrawals, ..Default::default() } }
    }

    /// Returns the hash of the derived genesis block.
    pub fn hash(&self) -> B256 {
        self.to_block().hash()
    }
}

/// A derived genesis block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisBlock {
    /// The sealed header.
    pub header: SealedHeader,
    /// The body. Always empty, with an empty withdrawal list once Shanghai is active.
    pub body: StoredBody,
}

impl GenesisBlock {
    /// Returns the block hash.
    pub const fn hash(&self) -> B256 {
        self.header.hash()
    }

    /// Returns the block number.
    pub const fn number(&self) -> u64 {
        self.header.number()
    }
}

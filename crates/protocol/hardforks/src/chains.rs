//! Known networks.

use alloy_primitives::{B256, b256};

use crate::ChainConfig;

/// Genesis hash of Ethereum mainnet, shared by Ethereum Classic.
pub const MAINNET_GENESIS_HASH: B256 =
    b256!("0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3");

/// Genesis hash of the Goerli testnet.
pub const GOERLI_GENESIS_HASH: B256 =
    b256!("0xbf7e331f7f7c1dd2e05159666b3bf8bc7a8a3a9eb1d518969eab529dd9b88c1a");

/// Genesis hash of the Sepolia testnet.
pub const SEPOLIA_GENESIS_HASH: B256 =
    b256!("0x25a5cc106eea7138acab33231d7160d69cb777ee0c2c553fcddf5138993e6dd9");

/// Genesis hash of the Mordor Classic testnet.
pub const MORDOR_GENESIS_HASH: B256 =
    b256!("0xa68ebde7932eccb177d38d55dcc6461a019dd795a681e59b5a3e4f3a7259a3f1");

/// A network with a built-in schedule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum KnownChain {
    /// Ethereum mainnet.
    Mainnet,
    /// Goerli.
    Goerli,
    /// Sepolia.
    Sepolia,
    /// Ethereum Classic.
    Classic,
    /// Mordor.
    Mordor,
}

impl KnownChain {
    /// Returns the schedule of the network.
    pub fn config(self) -> ChainConfig {
        match self {
            Self::Mainnet => ChainConfig::mainnet(),
            Self::Goerli => ChainConfig::goerli(),
            Self::Sepolia => ChainConfig::sepolia(),
            Self::Classic => ChainConfig::classic(),
            Self::Mordor => ChainConfig::mordor(),
        }
    }

    /// Returns the genesis hash of the network.
    pub const fn genesis_hash(self) -> B256 {
        match self {
            Self::Mainnet | Self::Classic => MAINNET_GENESIS_HASH,
            Self::Goerli => GOERLI_GENESIS_HASH,
            Self::Sepolia => SEPOLIA_GENESIS_HASH,
            Self::Mordor => MORDOR_GENESIS_HASH,
        }
    }

    /// Looks up a network by genesis hash. The shared mainnet hash resolves to Ethereum mainnet.
    pub fn from_genesis_hash(hash: B256) -> Option<Self> {
        [Self::Mainnet, Self::Goerli, Self::Sepolia, Self::Mordor]
            .into_iter()
            .find(|chain| chain.genesis_hash() == hash)
    }
}

impl ChainConfig {
    /// Returns the built-in schedule of the network with the given genesis hash.
    pub fn for_genesis_hash(hash: B256) -> Option<Self> {
        KnownChain::from_genesis_hash(hash).map(KnownChain::config)
    }
}

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/forkline/forkline/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod hardfork;
pub use hardfork::Hardfork;

mod condition;
pub use condition::ForkCondition;

mod engine;
pub use engine::{CliqueConfig, ConsensusEngine};

mod schedule;
pub use schedule::ForkSchedule;

mod config;
pub use config::ChainConfig;

#[cfg(feature = "serde")]
mod json;

mod compat;
pub use compat::CompatError;

mod chains;
pub use chains::{
    GOERLI_GENESIS_HASH, KnownChain, MAINNET_GENESIS_HASH, MORDOR_GENESIS_HASH,
    SEPOLIA_GENESIS_HASH,
};

#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::GenesisError;

mod state;
pub use state::{GenesisAccount, GenesisAlloc, state_root};

mod genesis;
pub use genesis::{
    GENESIS_DIFFICULTY, GENESIS_GAS_LIMIT, Genesis, GenesisBlock, INITIAL_BASE_FEE,
};

mod overrides;
pub use overrides::ChainOverrides;

mod commit;
pub use commit::{commit_genesis, commit_genesis_state, read_genesis};

mod setup;
pub use setup::{load_clique_config, setup_genesis_block};

use alloy_primitives::B256;
use forkline_hardforks::CompatError;
use forkline_storage::StorageError;
use thiserror::Error;

/// Errors raised while building, committing or reconciling a genesis block.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// A genesis was supplied without a chain configuration.
    #[error("genesis has no chain configuration")]
    NoConfig,
    /// The supplied genesis does not hash to the genesis already in the database.
    #[error("database contains incompatible genesis (have {stored}, new {new})")]
    GenesisMismatch {
        /// The genesis hash found in the database.
        stored: B256,
        /// The hash of the supplied genesis.
        new: B256,
    },
    /// The genesis block number is not zero.
    #[error("can't commit genesis block with number > 0")]
    NonZeroGenesisBlock,
    /// A Clique genesis has no signers in its extra data.
    #[error("can't start clique chain without signers")]
    CliqueMissingSigners,
    /// No genesis was supplied and none is bundled for the database to start from.
    #[error("no genesis supplied and no default genesis allocation is bundled")]
    NoDefaultGenesis,
    /// The database has a genesis block but no head header.
    #[error("missing head header")]
    MissingHeadHeader,
    /// The database has no canonical genesis header.
    #[error("genesis block missing from db")]
    MissingGenesisHeader,
    /// The genesis allocation is neither stored nor known for this genesis hash.
    #[error("genesis state missing from db")]
    MissingGenesisState,
    /// The database has no chain configuration for the genesis.
    #[error("genesis config missing from db")]
    MissingChainConfig,
    /// The new chain configuration conflicts with the chain already in the database.
    #[error(transparent)]
    Incompatible(#[from] CompatError),
    /// The database failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A genesis allocation could not be (de)serialized.
    #[error("genesis state json: {0}")]
    Json(#[from] serde_json::Error),
}

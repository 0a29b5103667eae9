//! Reconciling a supplied genesis with the one already in the database.

use crate::{ChainOverrides, Genesis, GenesisError, commit_genesis, commit::flush_alloc};
use alloy_primitives::B256;
use alloy_trie::EMPTY_ROOT_HASH;
use forkline_hardforks::{ChainConfig, CliqueConfig};
use forkline_storage::{ChainStoreReader, ChainStoreWriter, KeyValueStore, MemoryDb};
use tracing::{info, warn};

/// Makes sure the database holds a genesis block and returns the chain configuration to run with
/// and the genesis hash.
///
/// - An empty database gets `genesis` committed. Without one this fails with
///   [`GenesisError::NoDefaultGenesis`], as does recommitting a missing genesis state.
/// - A supplied genesis must hash to the stored one.
/// - The configuration to run with is the supplied one, else the built-in schedule for the stored
///   genesis hash, else [`ChainConfig::all_protocol_changes`]. Without a supplied genesis, a stored
///   configuration that differs from that default in more than its ids is kept as is.
/// - A new configuration is only written if it is compatible with the chain up to its current
///   head.
///
/// `overrides` are applied to the returned configuration. They are not part of a freshly
/// committed genesis config.
pub fn setup_genesis_block<DB>(
    db: &DB,
    genesis: Option<&Genesis>,
    overrides: &ChainOverrides,
) -> Result<(ChainConfig, B256), GenesisError>
where
    DB: KeyValueStore + ?Sized,
{
    if genesis.is_some_and(|genesis| genesis.config.is_none()) {
        return Err(GenesisError::NoConfig);
    }
    let with_overrides = |mut config: ChainConfig| {
        overrides.apply(&mut config);
        config
    };

    let Some(stored) = db.read_canonical_hash(0)? else {
        let genesis = genesis.ok_or(GenesisError::NoDefaultGenesis)?;
        info!(target: "genesis", "Writing custom genesis block");
        let block = commit_genesis(genesis, db)?;
        let config = with_overrides(effective_config(genesis));
        return Ok((config, block.hash()));
    };

    // The genesis block is known but the state behind it is missing.
    let header = db.read_header(stored, 0)?.ok_or(GenesisError::MissingGenesisHeader)?;
    if header.state_root != EMPTY_ROOT_HASH && db.read_genesis_state(header.state_root)?.is_none() {
        let genesis = genesis.ok_or(GenesisError::NoDefaultGenesis)?;
        let hash = genesis.hash();
        if hash != stored {
            return Err(GenesisError::GenesisMismatch { stored, new: hash });
        }
        warn!(target: "genesis", root = %header.state_root, "Recommitting missing genesis state");
        flush_alloc(db, &genesis.alloc)?;
        return Ok((with_overrides(effective_config(genesis)), stored));
    }

    if let Some(genesis) = genesis {
        let hash = genesis.hash();
        if hash != stored {
            return Err(GenesisError::GenesisMismatch { stored, new: hash });
        }
    }

    let new_config = with_overrides(config_or_default(genesis, stored));
    let Some(stored_config) = db.read_chain_config(stored)? else {
        warn!(target: "genesis", hash = %stored, "Found genesis block without chain config");
        db.write_chain_config(stored, &new_config)?;
        return Ok((new_config, stored));
    };
    info!(
        target: "genesis",
        hash = %stored,
        chain_id = stored_config.chain_id,
        "Found stored genesis block"
    );

    // A private network's config is not upgradable through the defaults.
    if genesis.is_none() && !stored_config.is_identical_ignoring_ids(&new_config) {
        info!(target: "genesis", "Found non-default stored config, using it");
        return Ok((with_overrides(stored_config), stored));
    }

    let head = db.read_head_header()?.ok_or(GenesisError::MissingHeadHeader)?;
    if let Err(err) = stored_config.check_compatible(&new_config, head.number(), head.timestamp) {
        let rewinds_blocks = head.number() != 0 && err.rewind_to_block != 0;
        let rewinds_time = head.timestamp != 0 && err.rewind_to_time != 0;
        if rewinds_blocks || rewinds_time {
            return Err(err.into());
        }
    }
    if serde_json::to_vec(&stored_config)? != serde_json::to_vec(&new_config)? {
        info!(target: "genesis", hash = %stored, "Updating stored chain config");
        db.write_chain_config(stored, &new_config)?;
    }
    Ok((new_config, stored))
}

/// Returns the Clique parameters of the chain, from the stored config if it is a Clique chain,
/// else from `genesis`. `None` means the chain does not run Clique.
pub fn load_clique_config<DB>(
    db: &DB,
    genesis: Option<&Genesis>,
) -> Result<Option<CliqueConfig>, GenesisError>
where
    DB: KeyValueStore + ?Sized,
{
    let stored = db.read_canonical_hash(0)?;
    if let Some(stored) = stored {
        let clique = db.read_chain_config(stored)?.and_then(|config| config.consensus.clique());
        if clique.is_some() {
            return Ok(clique);
        }
    }

    let Some(genesis) = genesis else { return Ok(None) };
    let Some(config) = genesis.config.as_ref() else { return Err(GenesisError::NoConfig) };
    // Committing into a scratch store applies the same checks as a real commit.
    let hash = commit_genesis(genesis, &MemoryDb::new())?.hash();
    if let Some(stored) = stored.filter(|stored| *stored != hash) {
        return Err(GenesisError::GenesisMismatch { stored, new: hash });
    }
    Ok(config.consensus.clique())
}

fn effective_config(genesis: &Genesis) -> ChainConfig {
    genesis.config.clone().unwrap_or_else(ChainConfig::all_protocol_changes)
}

fn config_or_default(genesis: Option<&Genesis>, hash: B256) -> ChainConfig {
    genesis
        .and_then(|genesis| genesis.config.clone())
        .or_else(|| ChainConfig::for_genesis_hash(hash))
        .unwrap_or_else(ChainConfig::all_protocol_changes)
}

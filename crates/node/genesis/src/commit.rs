//! Persisting and reading back the genesis block and its allocation.

use crate::{Genesis, GenesisAlloc, GenesisBlock, GenesisError, state_root};
use alloy_primitives::B256;
use forkline_hardforks::{ChainConfig, ForkSchedule};
use forkline_storage::{ChainStoreReader, ChainStoreWriter, KeyValueStore};
use tracing::{debug, info};

/// Writes the genesis block, its allocation and its chain configuration, and makes the block the
/// canonical head.
///
/// A genesis without a config is committed under
/// [`ChainConfig::all_protocol_changes`]. The head pointers are written last, so an interrupted
/// commit can be repeated.
pub fn commit_genesis<DB>(genesis: &Genesis, db: &DB) -> Result<GenesisBlock, GenesisError>
where
    DB: KeyValueStore + ?Sized,
{
    let block = genesis.to_block();
    if block.number() != 0 {
        return Err(GenesisError::NonZeroGenesisBlock);
    }
    let config = genesis.config.clone().unwrap_or_else(ChainConfig::all_protocol_changes);
    if config.consensus_engine().is_clique() && block.header.extra_data.is_empty() {
        return Err(GenesisError::CliqueMissingSigners);
    }

    let hash = block.hash();
    flush_alloc(db, &genesis.alloc)?;
    db.write_genesis_state(hash, &serde_json::to_vec(&genesis.alloc)?)?;
    db.write_td(hash, 0, block.header.difficulty)?;
    db.write_header(&block.header)?;
    db.write_body(hash, 0, &block.body)?;
    db.write_receipts(hash, 0, &[])?;
    db.write_canonical_hash(hash, 0)?;
    db.write_head_block_hash(hash)?;
    db.write_head_fast_block_hash(hash)?;
    db.write_head_header_hash(hash)?;
    db.write_chain_config(hash, &config)?;

    info!(
        target: "genesis",
        %hash,
        state_root = %block.header.state_root,
        accounts = genesis.alloc.len(),
        "Committed genesis block"
    );
    Ok(block)
}

/// Recommits the genesis allocation recorded for the genesis block `hash`.
pub fn commit_genesis_state<DB>(db: &DB, hash: B256) -> Result<B256, GenesisError>
where
    DB: KeyValueStore + ?Sized,
{
    let alloc = match db.read_genesis_state(hash)? {
        Some(blob) if !blob.is_empty() => serde_json::from_slice(&blob)?,
        _ => return Err(GenesisError::MissingGenesisState),
    };
    flush_alloc(db, &alloc)
}

/// Rebuilds the genesis specification from the database.
pub fn read_genesis<DB>(db: &DB) -> Result<Genesis, GenesisError>
where
    DB: KeyValueStore + ?Sized,
{
    let hash = db
        .read_canonical_hash(0)?
        .filter(|hash| !hash.is_zero())
        .ok_or(GenesisError::MissingGenesisHeader)?;
    let blob = db.read_genesis_state(hash)?.ok_or(GenesisError::MissingGenesisState)?;
    let alloc = if blob.is_empty() { GenesisAlloc::new() } else { serde_json::from_slice(&blob)? };
    let config = db.read_chain_config(hash)?.ok_or(GenesisError::MissingChainConfig)?;
    let header = db.read_header(hash, 0)?.ok_or(GenesisError::MissingGenesisHeader)?;

    Ok(Genesis {
        config: Some(config),
        nonce: u64::from_be_bytes(header.nonce.0),
        timestamp: header.timestamp,
        extra_data: header.extra_data,
        gas_limit: header.gas_limit,
        difficulty: Some(header.difficulty),
        mix_hash: header.mix_hash,
        coinbase: header.beneficiary,
        alloc,
        base_fee_per_gas: header.base_fee_per_gas,
        excess_blob_gas: header.excess_blob_gas,
        blob_gas_used: header.blob_gas_used,
        ..Default::default()
    })
}

/// Records `alloc` as the state behind its root, returning the root.
pub(crate) fn flush_alloc<DB>(db: &DB, alloc: &GenesisAlloc) -> Result<B256, GenesisError>
where
    DB: KeyValueStore + ?Sized,
{
    let root = state_root(alloc);
    db.write_genesis_state(root, &serde_json::to_vec(alloc)?)?;
    debug!(target: "genesis", %root, accounts = alloc.len(), "Flushed genesis state");
    Ok(root)
}

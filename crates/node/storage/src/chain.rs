//! Typed accessors for the chain schema.

use crate::{KeyValueStore, SealedHeader, StorageError, StoredBody, schema};
use alloy_consensus::Header;
use alloy_primitives::{B256, Bytes, U256};
use alloy_rlp::{Decodable, Encodable};
use forkline_hardforks::ChainConfig;

fn decode_rlp<T: Decodable>(what: &'static str, bytes: &[u8]) -> Result<T, StorageError> {
    alloy_rlp::decode_exact(bytes).map_err(|err| StorageError::decode(what, err))
}

fn decode_hash(what: &'static str, bytes: &[u8]) -> Result<B256, StorageError> {
    B256::try_from(bytes).map_err(|_| StorageError::decode(what, format!("{} bytes", bytes.len())))
}

/// Read access to chain data.
///
/// Implemented for every [`KeyValueStore`]. Missing entries are `Ok(None)`; only backend and
/// decoding failures are errors.
pub trait ChainStoreReader: KeyValueStore {
    /// Returns the canonical block hash at the given height.
    fn read_canonical_hash(&self, number: u64) -> Result<Option<B256>, StorageError> {
        self.get(&schema::header_hash_key(number))?
            .map(|bytes| decode_hash("canonical hash", &bytes))
            .transpose()
    }

    /// Returns the block number of the header with the given hash.
    fn read_header_number(&self, hash: B256) -> Result<Option<u64>, StorageError> {
        self.get(&schema::header_number_key(hash))?
            .map(|bytes| {
                <[u8; 8]>::try_from(bytes.as_slice())
                    .map(u64::from_be_bytes)
                    .map_err(|_| StorageError::decode("header number", format!("{} bytes", bytes.len())))
            })
            .transpose()
    }

    /// Returns the header with the given hash and number.
    fn read_header(&self, hash: B256, number: u64) -> Result<Option<Header>, StorageError> {
        self.get(&schema::header_key(number, hash))?
            .map(|bytes| decode_rlp("header", &bytes))
            .transpose()
    }

    /// Returns the header with the given hash and number, sealed with that hash.
    fn read_sealed_header(&self, hash: B256, number: u64) -> Result<Option<SealedHeader>, StorageError> {
        Ok(self.read_header(hash, number)?.map(|header| SealedHeader::new(header, hash)))
    }

    /// Returns the total difficulty of the block with the given hash and number.
    fn read_td(&self, hash: B256, number: u64) -> Result<Option<U256>, StorageError> {
        self.get(&schema::header_td_key(number, hash))?
            .map(|bytes| decode_rlp("total difficulty", &bytes))
            .transpose()
    }

    /// Returns the body of the block with the given hash and number.
    fn read_body(&self, hash: B256, number: u64) -> Result<Option<StoredBody>, StorageError> {
        self.get(&schema::block_body_key(number, hash))?
            .map(|bytes| decode_rlp("block body", &bytes))
            .transpose()
    }

    /// Returns the encoded receipts of the block with the given hash and number.
    fn read_receipts(&self, hash: B256, number: u64) -> Result<Option<Vec<Bytes>>, StorageError> {
        self.get(&schema::block_receipts_key(number, hash))?
            .map(|bytes| decode_rlp("receipts", &bytes))
            .transpose()
    }

    /// Returns the hash of the canonical head header.
    fn read_head_header_hash(&self) -> Result<Option<B256>, StorageError> {
        self.get(schema::HEAD_HEADER_KEY)?.map(|bytes| decode_hash("head header hash", &bytes)).transpose()
    }

    /// Returns the hash of the canonical head block.
    fn read_head_block_hash(&self) -> Result<Option<B256>, StorageError> {
        self.get(schema::HEAD_BLOCK_KEY)?.map(|bytes| decode_hash("head block hash", &bytes)).transpose()
    }

    /// Returns the hash of the fast-sync head block.
    fn read_head_fast_block_hash(&self) -> Result<Option<B256>, StorageError> {
        self.get(schema::HEAD_FAST_BLOCK_KEY)?
            .map(|bytes| decode_hash("head fast block hash", &bytes))
            .transpose()
    }

    /// Returns the canonical head header.
    fn read_head_header(&self) -> Result<Option<SealedHeader>, StorageError> {
        let Some(hash) = self.read_head_header_hash()? else { return Ok(None) };
        let Some(number) = self.read_header_number(hash)? else { return Ok(None) };
        self.read_sealed_header(hash, number)
    }

    /// Returns the chain configuration stored for the given genesis hash.
    fn read_chain_config(&self, genesis_hash: B256) -> Result<Option<ChainConfig>, StorageError> {
        self.get(&schema::config_key(genesis_hash))?
            .map(|bytes| {
                serde_json::from_slice(&bytes).map_err(|err| StorageError::decode("chain config", err))
            })
            .transpose()
    }

    /// Returns the raw genesis allocation blob stored under a genesis block hash or state root.
    fn read_genesis_state(&self, hash: B256) -> Result<Option<Vec<u8>>, StorageError> {
        self.get(&schema::genesis_state_key(hash))
    }
}

impl<T: KeyValueStore + ?Sized> ChainStoreReader for T {}

/// Write access to chain data.
///
/// Implemented for every [`KeyValueStore`].
pub trait ChainStoreWriter: KeyValueStore {
    /// Marks `hash` as the canonical block at `number`.
    fn write_canonical_hash(&self, hash: B256, number: u64) -> Result<(), StorageError> {
        self.put(&schema::header_hash_key(number), hash.as_slice())
    }

    /// Stores a header and its hash to number index.
    fn write_header(&self, header: &SealedHeader) -> Result<(), StorageError> {
        let (hash, number) = (header.hash(), header.number());
        let mut encoded = Vec::with_capacity(header.header().length());
        header.header().encode(&mut encoded);

        self.put(&schema::header_number_key(hash), &number.to_be_bytes())?;
        self.put(&schema::header_key(number, hash), &encoded)?;
        tracing::trace!(target: "storage", %hash, number, "Stored header");
        Ok(())
    }

    /// Stores the total difficulty of a block.
    fn write_td(&self, hash: B256, number: u64, td: U256) -> Result<(), StorageError> {
        self.put(&schema::header_td_key(number, hash), &alloy_rlp::encode(td))
    }

    /// Stores a block body.
    fn write_body(&self, hash: B256, number: u64, body: &StoredBody) -> Result<(), StorageError> {
        self.put(&schema::block_body_key(number, hash), &alloy_rlp::encode(body))
    }

    /// Stores the encoded receipts of a block.
    fn write_receipts(&self, hash: B256, number: u64, receipts: &[Bytes]) -> Result<(), StorageError> {
        self.put(&schema::block_receipts_key(number, hash), &alloy_rlp::encode(receipts.to_vec()))
    }

    /// Points the canonical head header at `hash`.
    fn write_head_header_hash(&self, hash: B256) -> Result<(), StorageError> {
        self.put(schema::HEAD_HEADER_KEY, hash.as_slice())
    }

    /// Points the canonical head block at `hash`.
    fn write_head_block_hash(&self, hash: B256) -> Result<(), StorageError> {
        self.put(schema::HEAD_BLOCK_KEY, hash.as_slice())
    }

    /// Points the fast-sync head block at `hash`.
    fn write_head_fast_block_hash(&self, hash: B256) -> Result<(), StorageError> {
        self.put(schema::HEAD_FAST_BLOCK_KEY, hash.as_slice())
    }

    /// Stores the chain configuration for a genesis hash.
    fn write_chain_config(&self, genesis_hash: B256, config: &ChainConfig) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec(config)?;
        self.put(&schema::config_key(genesis_hash), &encoded)
    }

    /// Stores a raw genesis allocation blob under a genesis block hash or state root.
    fn write_genesis_state(&self, hash: B256, blob: &[u8]) -> Result<(), StorageError> {
        self.put(&schema::genesis_state_key(hash), blob)
    }
}

impl<T: KeyValueStore + ?Sized> ChainStoreWriter for T {}

//! Database key layout.
//!
//! Keys are the geth `rawdb` layout, so a store written by this crate can be inspected with the
//! usual tooling. Block numbers are encoded as 8 big-endian bytes.

use alloy_primitives::B256;

/// Hash of the current canonical head header.
pub const HEAD_HEADER_KEY: &[u8] = b"LastHeader";

/// Hash of the current canonical head block.
pub const HEAD_BLOCK_KEY: &[u8] = b"LastBlock";

/// Hash of the current head block during a fast sync.
pub const HEAD_FAST_BLOCK_KEY: &[u8] = b"LastFast";

const HEADER_PREFIX: u8 = b'h';
const HEADER_TD_SUFFIX: u8 = b't';
const HEADER_HASH_SUFFIX: u8 = b'n';
const HEADER_NUMBER_PREFIX: u8 = b'H';
const BLOCK_BODY_PREFIX: u8 = b'b';
const BLOCK_RECEIPTS_PREFIX: u8 = b'r';
const CONFIG_PREFIX: &[u8] = b"ethereum-config-";
const GENESIS_PREFIX: &[u8] = b"ethereum-genesis-";

fn number_hash_key(prefix: u8, number: u64, hash: B256) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + 8 + 32);
    key.push(prefix);
    key.extend_from_slice(&number.to_be_bytes());
    key.extend_from_slice(hash.as_slice());
    key
}

fn prefixed_hash_key(prefix: &[u8], hash: B256) -> Vec<u8> {
    [prefix, hash.as_slice()].concat()
}

/// `h` + number + hash: RLP encoded header.
pub fn header_key(number: u64, hash: B256) -> Vec<u8> {
    number_hash_key(HEADER_PREFIX, number, hash)
}

/// `h` + number + hash + `t`: RLP encoded total difficulty.
pub fn header_td_key(number: u64, hash: B256) -> Vec<u8> {
    let mut key = header_key(number, hash);
    key.push(HEADER_TD_SUFFIX);
    key
}

/// `h` + number + `n`: canonical hash at a height.
pub fn header_hash_key(number: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + 8 + 1);
    key.push(HEADER_PREFIX);
    key.extend_from_slice(&number.to_be_bytes());
    key.push(HEADER_HASH_SUFFIX);
    key
}

/// `H` + hash: block number of a header.
pub fn header_number_key(hash: B256) -> Vec<u8> {
    prefixed_hash_key(&[HEADER_NUMBER_PREFIX], hash)
}

/// `b` + number + hash: RLP encoded block body.
pub fn block_body_key(number: u64, hash: B256) -> Vec<u8> {
    number_hash_key(BLOCK_BODY_PREFIX, number, hash)
}

/// `r` + number + hash: RLP encoded block receipts.
pub fn block_receipts_key(number: u64, hash: B256) -> Vec<u8> {
    number_hash_key(BLOCK_RECEIPTS_PREFIX, number, hash)
}

/// `ethereum-config-` + genesis hash: JSON chain configuration.
pub fn config_key(genesis_hash: B256) -> Vec<u8> {
    prefixed_hash_key(CONFIG_PREFIX, genesis_hash)
}

/// `ethereum-genesis-` + hash: JSON genesis allocation.
///
/// Written under both the genesis block hash and the genesis state root.
pub fn genesis_state_key(hash: B256) -> Vec<u8> {
    prefixed_hash_key(GENESIS_PREFIX, hash)
}

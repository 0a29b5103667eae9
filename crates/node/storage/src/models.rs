//! Stored value types.

use alloy_consensus::Header;
use alloy_eips::eip4895::Withdrawal;
use alloy_primitives::{B256, BlockNumber, Bytes};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// A header together with its hash.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct SealedHeader {
    #[deref]
    header: Header,
    hash: B256,
}

impl SealedHeader {
    /// Pairs a header with a hash the caller already knows to be correct.
    pub const fn new(header: Header, hash: B256) -> Self {
        Self { header, hash }
    }

    /// Hashes the header and seals it.
    pub fn seal_slow(header: Header) -> Self {
        let hash = header.hash_slow();
        Self { header, hash }
    }

    /// Returns the block hash.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Returns the block number.
    pub const fn number(&self) -> BlockNumber {
        self.header.number
    }

    /// Returns the inner header.
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Unseals the header.
    pub fn into_header(self) -> Header {
        self.header
    }
}

/// A block body as persisted under the `b` prefix.
///
/// Transactions are kept in their opaque encoded form; the chain-selection core never executes
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[rlp(trailing)]
pub struct StoredBody {
    /// Encoded transactions.
    pub transactions: Vec<Bytes>,
    /// Uncle headers.
    pub ommers: Vec<Header>,
    /// Withdrawals, present from Shanghai on.
    pub withdrawals: Option<Vec<Withdrawal>>,
}

//! Chain fixtures.

use alloy_consensus::Header;
use alloy_primitives::{Bytes, U256};
use forkline_storage::{ChainStoreReader, ChainStoreWriter, KeyValueStore, SealedHeader};

/// Writes linked headers and their total difficulties into a store.
#[derive(Debug)]
pub(crate) struct ChainBuilder<DB> {
    db: DB,
    genesis: SealedHeader,
}

impl<DB: KeyValueStore> ChainBuilder<DB> {
    /// Writes a genesis header with difficulty 100 and timestamp 0.
    pub(crate) fn new(db: DB) -> Self {
        let genesis = SealedHeader::seal_slow(Header {
            difficulty: U256::from(100),
            gas_limit: 5000,
            ..Default::default()
        });
        db.write_header(&genesis).unwrap();
        db.write_td(genesis.hash(), 0, genesis.difficulty).unwrap();
        Self { db, genesis }
    }

    pub(crate) fn genesis(&self) -> SealedHeader {
        self.genesis.clone()
    }

    /// Appends `count` headers to `parent`, each with the given difficulty and spaced
    /// `block_time` seconds apart. `salt` is written into the extra data to fork off distinct
    /// branches from the same parent.
    pub(crate) fn extend(
        &self,
        parent: &SealedHeader,
        count: u64,
        difficulty: u64,
        block_time: u64,
        salt: u8,
    ) -> Vec<SealedHeader> {
        let mut td = self.db.read_td(parent.hash(), parent.number()).unwrap().unwrap();
        let mut parent = parent.clone();
        let mut headers = Vec::new();
        for _ in 0..count {
            let header = SealedHeader::seal_slow(Header {
                parent_hash: parent.hash(),
                number: parent.number() + 1,
                timestamp: parent.timestamp + block_time,
                difficulty: U256::from(difficulty),
                gas_limit: 5000,
                extra_data: Bytes::from(vec![salt]),
                ..Default::default()
            });
            td += header.difficulty;
            self.db.write_header(&header).unwrap();
            self.db.write_td(header.hash(), header.number(), td).unwrap();
            headers.push(header.clone());
            parent = header;
        }
        headers
    }

    pub(crate) fn into_db(self) -> DB {
        self.db
    }
}

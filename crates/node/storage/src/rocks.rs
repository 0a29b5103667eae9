//! RocksDB backed store.

use crate::{KeyValueStore, StorageError};
use rocksdb::{DB, Options};
use std::path::Path;

/// A [`KeyValueStore`] persisted in a RocksDB database.
pub struct RocksDb {
    db: DB,
}

impl core::fmt::Debug for RocksDb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RocksDb").field("path", &self.db.path()).finish()
    }
}

impl RocksDb {
    /// Creates or opens a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        tracing::info!(target: "storage", path = %path.display(), "Opening RocksDB");

        let mut opts = Options::default();
        opts.create_if_missing(true);
        // Stay well below the default per-process descriptor limit on macOS.
        opts.set_max_open_files(150);
        Ok(Self { db: DB::open(&opts, path)? })
    }
}

impl KeyValueStore for RocksDb {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.db.get(key)?)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        Ok(self.db.put(key, value)?)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        Ok(self.db.delete(key)?)
    }
}

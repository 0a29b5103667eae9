#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::StorageError;

mod traits;
pub use traits::KeyValueStore;

mod memory;
pub use memory::MemoryDb;

#[cfg(feature = "rocksdb")]
mod rocks;
#[cfg(feature = "rocksdb")]
pub use rocks::RocksDb;

pub mod schema;

mod models;
pub use models::{SealedHeader, StoredBody};

mod chain;
pub use chain::{ChainStoreReader, ChainStoreWriter};

use thiserror::Error;

/// Errors that may occur while reading or writing chain data.
///
/// This enum is shared by every [`KeyValueStore`](crate::KeyValueStore) implementation and the
/// schema accessors built on top of them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The RocksDB backend failed.
    #[cfg(feature = "rocksdb")]
    #[error("Database error")]
    Database(#[from] rocksdb::Error),

    /// A stored value could not be decoded.
    #[error("Failed to decode {what}: {reason}")]
    Decode {
        /// The kind of value that failed to decode.
        what: &'static str,
        /// Why decoding failed.
        reason: String,
    },

    /// A value could not be encoded for storage.
    #[error("Failed to encode value")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn decode(what: &'static str, reason: impl ToString) -> Self {
        Self::Decode { what, reason: reason.to_string() }
    }
}

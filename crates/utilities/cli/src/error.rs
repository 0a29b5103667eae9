//! Error types for CLI utilities.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors that can occur in CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The named chain is not a built-in preset.
    #[error("unknown chain {0:?}, expected one of mainnet, goerli, sepolia, classic, mordor")]
    UnknownChain(String),

    /// A file named on the command line could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The global tracing subscriber was already installed.
    #[error("failed to initialize tracing: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;

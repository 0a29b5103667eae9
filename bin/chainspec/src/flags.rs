//! Global arguments for the CLI.

use alloy_primitives::B256;
use anyhow::Context;
use clap::Parser;
use forkline_cli::{CliError, LogArgs};
use forkline_genesis::{Genesis, GenesisError};
use forkline_hardforks::{ChainConfig, KnownChain};
use std::path::PathBuf;
use tracing::debug;

/// Global arguments for the CLI.
#[derive(Parser, Clone, Debug)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// The built-in chain to inspect.
    #[arg(
        long,
        short = 'c',
        global = true,
        default_value = "mainnet",
        env = "FORKLINE_CHAIN",
        value_parser = parse_chain
    )]
    pub chain: KnownChain,
    /// Path to a `genesis.json` to inspect instead of a built-in chain.
    #[arg(long, global = true, env = "FORKLINE_GENESIS")]
    pub genesis: Option<PathBuf>,
}

fn parse_chain(name: &str) -> Result<KnownChain, CliError> {
    name.parse().map_err(|_| CliError::UnknownChain(name.to_string()))
}

/// The chain the commands operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    /// The fork schedule.
    pub config: ChainConfig,
    /// The genesis block hash.
    pub genesis_hash: B256,
    /// The genesis specification, if loaded from a file.
    pub genesis: Option<Genesis>,
}

impl ChainSpec {
    /// A built-in chain.
    pub fn preset(chain: KnownChain) -> Self {
        Self { config: chain.config(), genesis_hash: chain.genesis_hash(), genesis: None }
    }

    /// A chain defined by a genesis specification.
    pub fn from_genesis(genesis: Genesis) -> anyhow::Result<Self> {
        let config = genesis.config.clone().ok_or(GenesisError::NoConfig)?;
        Ok(Self { config, genesis_hash: genesis.hash(), genesis: Some(genesis) })
    }
}

impl GlobalArgs {
    /// Resolves the chain to operate on, preferring `--genesis` over `--chain`.
    pub fn chain_spec(&self) -> anyhow::Result<ChainSpec> {
        let Some(path) = self.genesis.as_ref() else {
            debug!(chain = %self.chain, "Using built-in chain");
            return Ok(ChainSpec::preset(self.chain));
        };
        let json = std::fs::read_to_string(path)
            .map_err(|source| CliError::ReadFile { path: path.clone(), source })?;
        let genesis: Genesis = serde_json::from_str(&json)
            .with_context(|| format!("invalid genesis file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded genesis");
        ChainSpec::from_genesis(genesis)
    }
}

//! Genesis Subcommand

use crate::flags::ChainSpec;
use anyhow::{Result, bail};
use clap::Parser;
use forkline_genesis::{ChainOverrides, Genesis, setup_genesis_block};
use forkline_storage::RocksDb;
use std::{fmt::Write, path::PathBuf};
use tracing::info;

/// The `genesis` Subcommand
///
/// Prints the genesis block of the chain. With `--datadir`, the genesis is also committed to
/// (or reconciled with) the database in that directory. No preset bundles its genesis
/// allocation, so initializing a database needs `--genesis`.
///
/// # Usage
///
/// ```sh
/// chainspec --genesis genesis.json genesis [--datadir <DIR>] [--override.cancun <TIME>]
/// ```
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Prints the genesis block of the chain")]
pub struct GenesisCommand {
    /// Database directory to initialize with the genesis block.
    #[arg(long)]
    pub datadir: Option<PathBuf>,
    /// Overrides the Shanghai activation timestamp.
    #[arg(long = "override.shanghai", requires = "datadir")]
    pub override_shanghai: Option<u64>,
    /// Overrides the Cancun activation timestamp.
    #[arg(long = "override.cancun", requires = "datadir")]
    pub override_cancun: Option<u64>,
}

impl GenesisCommand {
    /// Runs the subcommand, returning the rendered output.
    pub fn run(&self, spec: &ChainSpec) -> Result<String> {
        let mut out = String::new();
        match spec.genesis.as_ref() {
            Some(genesis) => describe(genesis, &mut out)?,
            None => writeln!(out, "hash: {}", spec.genesis_hash)?,
        }

        if let Some(datadir) = self.datadir.as_ref() {
            if spec.genesis.is_none() {
                bail!("no bundled genesis for chain {}, pass --genesis", spec.config.chain_id);
            }
            let overrides = ChainOverrides {
                shanghai_time: self.override_shanghai,
                cancun_time: self.override_cancun,
                ..Default::default()
            };
            let db = RocksDb::open(datadir)?;
            let (config, hash) = setup_genesis_block(&db, spec.genesis.as_ref(), &overrides)?;
            info!(datadir = %datadir.display(), %hash, "Initialized database");
            writeln!(out, "stored: {hash}")?;
            writeln!(out, "chain id: {}", config.chain_id)?;
        }
        Ok(out)
    }
}

fn describe(genesis: &Genesis, out: &mut String) -> core::fmt::Result {
    let block = genesis.to_block();
    let header = &block.header;
    writeln!(out, "hash: {}", block.hash())?;
    writeln!(out, "number: {}", header.number)?;
    writeln!(out, "state root: {}", header.state_root)?;
    writeln!(out, "gas limit: {}", header.gas_limit)?;
    writeln!(out, "difficulty: {}", header.difficulty)?;
    writeln!(out, "accounts: {}", genesis.alloc.len())?;
    if let Some(base_fee) = header.base_fee_per_gas {
        writeln!(out, "base fee: {base_fee}")?;
    }
    if let Some(root) = header.withdrawals_root {
        writeln!(out, "withdrawals root: {root}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkline_hardforks::KnownChain;
    use rstest::rstest;

    const GENESIS: &str = r#"{
        "config": { "chainId": 1337, "hardforks": { "london": { "block": 0 } } },
        "gasLimit": "0x1c9c380",
        "difficulty": "0x1",
        "alloc": {
            "0x0000000000000000000000000000000000000001": { "balance": "0x64" }
        }
    }"#;

    fn custom() -> ChainSpec {
        let genesis: Genesis = serde_json::from_str(GENESIS).unwrap();
        ChainSpec::from_genesis(genesis).unwrap()
    }

    #[test]
    fn test_describe_custom_genesis() {
        let spec = custom();
        let out = GenesisCommand::default().run(&spec).unwrap();
        assert!(out.starts_with(&format!("hash: {}\n", spec.genesis_hash)));
        assert!(out.contains("gas limit: 30000000\n"));
        assert!(out.contains("accounts: 1\n"));
        assert!(out.contains("base fee: 1000000000\n"));
        assert!(!out.contains("withdrawals root"));
    }

    #[test]
    fn test_preset_prints_known_hash() {
        let out = GenesisCommand::default().run(&ChainSpec::preset(KnownChain::Sepolia)).unwrap();
        assert_eq!(out, format!("hash: {}\n", KnownChain::Sepolia.genesis_hash()));
    }

    #[test]
    fn test_init_datadir() {
        let dir = tempfile::tempdir().unwrap();
        let spec = custom();
        let cmd = GenesisCommand {
            datadir: Some(dir.path().to_path_buf()),
            override_cancun: Some(100),
            ..Default::default()
        };
        let out = cmd.run(&spec).unwrap();
        assert!(out.contains(&format!("stored: {}\n", spec.genesis_hash)));
        assert!(out.contains("chain id: 1337\n"));

        // Running again against the same database is a no-op.
        assert_eq!(cmd.run(&spec).unwrap(), out);
    }

    #[rstest]
    #[case::mainnet(KnownChain::Mainnet)]
    #[case::classic(KnownChain::Classic)]
    #[case::goerli(KnownChain::Goerli)]
    #[case::sepolia(KnownChain::Sepolia)]
    #[case::mordor(KnownChain::Mordor)]
    fn test_init_needs_genesis_file(#[case] chain: KnownChain) {
        let dir = tempfile::tempdir().unwrap();
        let datadir = dir.path().join("db");
        let cmd = GenesisCommand { datadir: Some(datadir.clone()), ..Default::default() };
        let err = cmd.run(&ChainSpec::preset(chain)).unwrap_err();
        assert!(err.to_string().contains("pass --genesis"));
        assert!(!datadir.exists());
    }
}

//! Contains the chainspec CLI.

use crate::{
    commands::{CheckCommand, ForkIdCommand, ForksCommand, GenesisCommand},
    flags::GlobalArgs,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use forkline_cli::cli_styles;

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Lists the fork activation points of the chain.
    Forks(ForksCommand),
    /// Prints the EIP-2124 fork identifier of the chain.
    #[command(name = "forkid")]
    ForkId(ForkIdCommand),
    /// Validates a remote fork identifier against the local chain.
    Check(CheckCommand),
    /// Prints the genesis block of the chain.
    Genesis(GenesisCommand),
}

/// The chainspec CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.global.log_args.init_tracing()?;
        let spec = self.global.chain_spec()?;

        let output = match self.subcommand {
            Commands::Forks(cmd) => cmd.run(&spec),
            Commands::ForkId(cmd) => cmd.run(&spec),
            Commands::Check(cmd) => cmd.run(&spec),
            Commands::Genesis(cmd) => cmd.run(&spec)?,
        };
        print!("{output}");
        Ok(())
    }
}

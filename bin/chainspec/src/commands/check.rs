//! Check Subcommand

use crate::flags::ChainSpec;
use clap::Parser;
use forkline_forkid::{ForkFilter, ForkHash, ForkId, Head};
use std::num::ParseIntError;

/// The `check` Subcommand
///
/// Runs a remote fork identifier through the local fork filter.
///
/// # Usage
///
/// ```sh
/// chainspec check --hash 0xfc64ec04 --next 1150000 --head 0
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Validates a remote fork identifier against the local chain")]
pub struct CheckCommand {
    /// The remote fork hash, as a 4-byte hex checksum.
    #[arg(long, value_parser = parse_fork_hash)]
    pub hash: ForkHash,
    /// The remote's next scheduled fork, 0 if none.
    #[arg(long, default_value_t = 0)]
    pub next: u64,
    /// Local head block number.
    #[arg(long, default_value_t = 0)]
    pub head: u64,
    /// Local head block timestamp.
    #[arg(long, default_value_t = 0)]
    pub time: u64,
}

fn parse_fork_hash(hash: &str) -> Result<ForkHash, ParseIntError> {
    let digits = hash.strip_prefix("0x").unwrap_or(hash);
    u32::from_str_radix(digits, 16).map(ForkHash::from)
}

impl CheckCommand {
    /// Runs the subcommand, returning the verdict.
    pub fn run(&self, spec: &ChainSpec) -> String {
        let filter = ForkFilter::new_static(
            &spec.config,
            spec.genesis_hash,
            Head::new(self.head, self.time),
        );
        match filter.validate(ForkId { hash: self.hash, next: self.next }) {
            Ok(()) => "compatible\n".to_string(),
            Err(err) => format!("incompatible: {err}\n"),
        }
    }
}

//! ForkId Subcommand

use crate::flags::ChainSpec;
use clap::Parser;
use forkline_forkid::{ForkId, gather_forks};
use tabled::{builder::Builder, settings::Style};

/// The `forkid` Subcommand
///
/// Prints the EIP-2124 fork identifier at a given head, or the identifier in effect after
/// every fork of the schedule.
///
/// # Usage
///
/// ```sh
/// chainspec forkid [--head <NUMBER>] [--time <TIMESTAMP>] [--table]
/// ```
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Prints the EIP-2124 fork identifier of the chain")]
pub struct ForkIdCommand {
    /// Head block number.
    #[arg(long, default_value_t = 0)]
    pub head: u64,
    /// Head block timestamp.
    #[arg(long, default_value_t = 0)]
    pub time: u64,
    /// Print the identifier in effect from genesis and after every fork.
    #[arg(long, conflicts_with_all = ["head", "time"])]
    pub table: bool,
}

impl ForkIdCommand {
    /// Runs the subcommand, returning the rendered output.
    pub fn run(&self, spec: &ChainSpec) -> String {
        if !self.table {
            let id = ForkId::new(&spec.config, spec.genesis_hash, self.head, self.time);
            return format!("{} {}\n", id.hash, id.next);
        }

        let mut builder = Builder::default();
        builder.push_record(["head", "time", "hash", "next"].map(String::from));
        for (head, time) in Self::heads(spec) {
            let id = ForkId::new(&spec.config, spec.genesis_hash, head, time);
            builder.push_record([
                head.to_string(),
                time.to_string(),
                id.hash.to_string(),
                id.next.to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        format!("{table}\n")
    }

    /// Heads at genesis and at each activation point. Timestamp forks are reached on top of the
    /// last block fork.
    fn heads(spec: &ChainSpec) -> Vec<(u64, u64)> {
        let (blocks, times) = gather_forks(&spec.config);
        let last_block = blocks.last().copied().unwrap_or_default();
        core::iter::once((0, 0))
            .chain(blocks.into_iter().map(|block| (block, 0)))
            .chain(times.into_iter().map(|time| (last_block, time)))
            .collect()
    }
}

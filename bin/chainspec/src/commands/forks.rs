//! Forks Subcommand

use crate::flags::ChainSpec;
use clap::Parser;
use forkline_forkid::gather_forks;
use forkline_hardforks::ChainConfig;
use tabled::{builder::Builder, settings::Style};

/// The `forks` Subcommand
///
/// Lists the distinct block activation points of the chain one per line, followed by its
/// timestamp activation points prefixed with `@`. With `--table`, every scheduled fork is listed
/// by name instead.
///
/// # Usage
///
/// ```sh
/// chainspec forks [--table [--all]]
/// ```
#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Lists the fork activation points of the chain")]
pub struct ForksCommand {
    /// List forks by name with their activation condition.
    #[arg(long)]
    pub table: bool,
    /// Also list forks that never activate.
    #[arg(long, requires = "table")]
    pub all: bool,
}

impl ForksCommand {
    /// Runs the subcommand, returning the rendered output.
    pub fn run(&self, spec: &ChainSpec) -> String {
        if self.table {
            return self.table(&spec.config);
        }
        let (blocks, times) = gather_forks(&spec.config);
        let mut out = String::new();
        for block in blocks {
            out.push_str(&format!("{block}\n"));
        }
        for time in times {
            out.push_str(&format!("@{time}\n"));
        }
        out
    }

    fn table(&self, config: &ChainConfig) -> String {
        let mut builder = Builder::default();
        builder.push_record(["fork".to_string(), "activation".to_string()]);
        for (fork, condition) in &config.hardforks {
            if self.all || !condition.is_never() {
                builder.push_record([fork.name().to_string(), condition.to_string()]);
            }
        }
        if let Some(block) = config.ecbp1100_block {
            builder.push_record(["ecbp1100".to_string(), format!("block {block}")]);
        }
        if let Some(block) = config.ecbp1100_disable_block {
            builder.push_record(["ecbp1100Disable".to_string(), format!("block {block}")]);
        }
        if let Some(ttd) = config.terminal_total_difficulty {
            builder.push_record(["terminalTotalDifficulty".to_string(), ttd.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        format!("{table}\n")
    }
}

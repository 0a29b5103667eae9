//! Logging flags.

use crate::{CliResult, init_tracing_subscriber};
use clap::{ArgAction, Args};

/// Logging flags shared by all subcommands.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level, repeat for more detail (-v warnings, -vv info, -vvv debug, -vvvv trace).
    #[arg(short = 'v', long = "verbosity", global = true, action = ArgAction::Count)]
    pub verbosity: u8,
    /// Only log errors. Takes precedence over `-v`.
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl LogArgs {
    /// Returns the effective verbosity, `0` when quiet.
    pub const fn level(&self) -> u8 {
        if self.quiet { 0 } else { self.verbosity }
    }

    /// Installs the global tracing subscriber. `RUST_LOG` directives are layered on top.
    pub fn init_tracing(&self) -> CliResult<()> {
        init_tracing_subscriber(self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        log: LogArgs,
    }

    #[rstest]
    #[case(&["test"], 0)]
    #[case(&["test", "-v"], 1)]
    #[case(&["test", "-vvv"], 3)]
    #[case(&["test", "--verbosity", "--verbosity"], 2)]
    #[case(&["test", "-vvvv", "-q"], 0)]
    fn test_log_level(#[case] args: &[&str], #[case] expected: u8) {
        let cli = TestCli::try_parse_from(args).unwrap();
        assert_eq!(cli.log.level(), expected);
    }
}

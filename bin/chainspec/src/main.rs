//! `chainspec` inspects the fork schedule, fork identifiers and genesis block of a chain.

mod cli;
mod commands;
mod flags;

use clap::Parser;

fn main() {
    forkline_cli::backtrace::enable();
    if let Err(err) = cli::Cli::parse().run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

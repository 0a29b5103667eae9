//! Contains subcommands for the chainspec CLI.

mod forks;
pub use forks::ForksCommand;

mod forkid;
pub use forkid::ForkIdCommand;

mod check;
pub use check::CheckCommand;

mod genesis;
pub use genesis::GenesisCommand;

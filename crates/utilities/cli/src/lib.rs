#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod backtrace;

mod error;
pub use error::{CliError, CliResult};

pub mod log;
pub use log::LogArgs;

mod subscriber;
pub use subscriber::{init_tracing_subscriber, verbosity_level};

mod styles;
pub use styles::cli_styles;

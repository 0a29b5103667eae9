//! Tracing subscriber setup.

use crate::CliResult;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps a `-v` count to the most verbose level that is logged.
pub const fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a formatting subscriber at the given verbosity. Directives from `RUST_LOG` refine the
/// default level, so `RUST_LOG=forkid=trace` works at any verbosity.
pub fn init_tracing_subscriber(verbosity: u8) -> CliResult<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbosity).into())
        .from_env_lossy();
    tracing_subscriber::registry().with(filter).with(fmt::layer()).try_init()?;
    Ok(())
}

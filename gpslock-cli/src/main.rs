//! gps-to-gpx entry point.
//!
//! Initializes logging on stderr and delegates to [`gpslock_cli::run`].

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let args = gpslock_cli::Args::parse();

    // RUST_LOG wins over --log-level; stdout is reserved for GPX output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .init();

    gpslock_cli::run(&args)
}

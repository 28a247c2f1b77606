//! Subscriber setup for binaries that embed kiln-config

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a tracing subscriber that prints compact logs to stdout.
///
/// The level comes from `RUST_LOG` and defaults to "info". Set
/// `RUST_LOG=kiln_config=debug` to follow each resolution stage, or `trace`
/// to see every key as it is assigned.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

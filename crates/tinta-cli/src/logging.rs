//! Tracing subscriber setup for the binary.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `TINTA_LOG=tinta_core=debug`.
pub const LOG_ENV: &str = "TINTA_LOG";

/// Install a stderr formatter filtered by [`LOG_ENV`] (default `info`).
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).try_init()
}

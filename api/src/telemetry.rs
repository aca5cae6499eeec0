//! Tracing subscriber setup for the binary

use anyhow::anyhow;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kw_shared::config::{LogFormat, LoggingConfig};

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::try_from_default_env().map_err(|e| e.to_string()),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| e.to_string()),
    }
    .map_err(|e| anyhow!("invalid log filter: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the JSON log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

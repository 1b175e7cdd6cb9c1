// src/infra/logger.rs — Structured logging with tracing

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. RUST_LOG takes precedence over `level`.
///
/// Fails on a malformed `level` directive or when a subscriber is already set.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let configured =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

//! Logging setup for the devlens binary.
//!
//! Structured logging via the `tracing` ecosystem. The level comes from
//! `--log-level` (or its `LOG_LEVEL` env var); a `RUST_LOG` filter, when
//! set, takes precedence for full per-target control.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber. Call once, before any logging.
pub fn init(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "devlens_cli={log_level},devlens_core={log_level},\
             devlens_api={log_level},devlens_browser={log_level}"
        ))
    });

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

// src/logging.rs

//! Logging setup for `cmdmux` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. explicit `level` argument (if provided)
//! 2. `CMDMUX_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`

use anyhow::anyhow;
use tracing_subscriber::fmt;

use crate::errors::Result;

/// Initialise a global logging subscriber.
///
/// Meant for binaries and test harnesses embedding this crate; applications
/// that already install their own subscriber should skip this. Fails with an
/// error (rather than panicking) if a subscriber is already set.
pub fn init_logging(level: Option<tracing::Level>) -> Result<()> {
    let level = match level {
        Some(lvl) => lvl,
        None => std::env::var("CMDMUX_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|err| anyhow!("installing tracing subscriber: {err}"))?;

    Ok(())
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

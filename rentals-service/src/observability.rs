//! Tracing initialization
//!
//! Log records go to two sinks: a human-readable stream on stdout and a JSON
//! stream appended to `service.log_file`.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, error::Result};

/// Initialize tracing for the process
///
/// `RUST_LOG` takes precedence over `service.log_level` when set. Fails if the
/// log file cannot be opened or a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let log_file = open_log_file(&config.service.log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .map_err(|e| {
            crate::error::Error::Internal(format!("Failed to install tracing subscriber: {}", e))
        })?;

    tracing::info!(
        log_file = %config.service.log_file.display(),
        "Tracing initialized for service: {}",
        config.service.name
    );

    Ok(())
}

/// Open the log file for appending, creating it if needed
pub fn open_log_file(path: &Path) -> Result<File> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

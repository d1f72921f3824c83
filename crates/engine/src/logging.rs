// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global tracing subscriber setup for host applications

use crate::SyncError;
use std::path::Path;
use syncq_core::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the configured filter. With a `log_path` the output
/// goes to that file through a non-blocking writer; keep the returned guard
/// alive until shutdown so buffered lines are flushed. Without one, logs go
/// to stderr.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, SyncError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| SyncError::Logging(format!("invalid filter: {}", e)))?;

    let Some(log_path) = &config.log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| SyncError::Logging(e.to_string()))?;
        return Ok(None);
    };

    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_path.file_name().ok_or_else(|| {
        SyncError::Logging(format!("log path has no file name: {}", log_path.display()))
    })?;
    std::fs::create_dir_all(dir)
        .map_err(|e| SyncError::Logging(format!("create {}: {}", dir.display(), e)))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .map_err(|e| SyncError::Logging(e.to_string()))?;

    Ok(Some(guard))
}

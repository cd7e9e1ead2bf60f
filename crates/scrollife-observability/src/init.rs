// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output goes to stderr so tools can keep stdout for data. With the
//! `file-logging` feature and a log directory, records are also written as
//! JSON into a timestamped run folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── scrollife.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LogOptions};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when it is dropped.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn env_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Installs the global subscriber.
///
/// # Errors
/// Fails on an unparseable level, when the run folder cannot be created, or
/// when a global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LogOptions) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&options.level);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console: BoxedLayer = match options.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(env_filter(&filter)?)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_filter(env_filter(&filter)?)
            .boxed(),
    };
    layers.push(console);

    #[cfg(feature = "file-logging")]
    let (file_guards, run_folder) = match &options.log_dir {
        Some(base) => {
            let (layer, guard, folder) = file::layer(base, &filter)?;
            layers.push(layer);
            (vec![guard], Some(folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let run_folder: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging initialized with filter '{}'", filter);

    #[cfg(feature = "file-logging")]
    if let Some(base) = &options.log_dir {
        file::cleanup_old_runs(base, options.retention_runs);
    }
    #[cfg(not(feature = "file-logging"))]
    if let Some(dir) = &options.log_dir {
        tracing::warn!(
            "Log directory {} ignored: built without file-logging",
            dir.display()
        );
    }

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

/// Console-only logging at `info`, honouring debug flags.
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LogOptions::default())
}

#[cfg(feature = "file-logging")]
mod file {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use chrono::Utc;
    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_appender::rolling;
    use tracing_subscriber::Layer;

    use super::{env_filter, BoxedLayer};

    const RUN_PREFIX: &str = "run_";

    /// JSON layer writing into a fresh `run_<timestamp>` folder under `base`.
    pub(super) fn layer(base: &Path, filter: &str) -> Result<(BoxedLayer, WorkerGuard, PathBuf)> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = base.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        let appender = rolling::never(&run_folder, "scrollife.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let layer: BoxedLayer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(env_filter(filter)?)
            .boxed();

        Ok((layer, guard, run_folder))
    }

    /// Removes all but the `keep` newest run folders. Failures are logged.
    pub(super) fn cleanup_old_runs(base: &Path, keep: usize) {
        let entries = match std::fs::read_dir(base) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot list log directory {}: {}", base.display(), e);
                return;
            }
        };

        // Timestamps sort lexically.
        let mut runs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_dir()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(RUN_PREFIX))
            })
            .collect();
        runs.sort();

        let excess = runs.len().saturating_sub(keep);
        for path in runs.into_iter().take(excess) {
            match std::fs::remove_dir_all(&path) {
                Ok(()) => tracing::debug!("Removed old log run {}", path.display()),
                Err(e) => tracing::warn!(
                    "Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }

}

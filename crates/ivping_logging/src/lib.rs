//! Logging setup for the Ivping binary.
//!
//! File output goes to a size-rotated log under the data directory; console
//! output goes to stderr and is kept quiet while the TUI owns the screen.

mod rolling;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use rolling::{RollingFileAppender, SharedRollingWriter};

pub const DEFAULT_LOG_FILTER: &str = "ivping=info,ivping_core=info";
pub const MAX_LOG_FILES: usize = 5;
pub const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Logging configuration for the Ivping binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    pub tui_mode: bool,
    /// Directory for the rolling log file; `None` logs to stderr only
    pub log_dir: Option<PathBuf>,
}

/// Initialize tracing with a rolling file writer and stderr output.
///
/// A log directory that cannot be created degrades to stderr-only output.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = console_filter(&config, &file_filter);

    let file_layer = match config.log_dir {
        Some(dir) => match SharedRollingWriter::new(dir.clone(), config.app_name) {
            Ok(writer) => Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(file_filter),
            ),
            Err(err) => {
                eprintln!(
                    "Warning: file logging disabled ({}): {:#}",
                    dir.display(),
                    err
                );
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn console_filter(config: &LogConfig<'_>, file_filter: &EnvFilter) -> EnvFilter {
    if config.tui_mode {
        // stderr shares the terminal with the TUI
        EnvFilter::new("error")
    } else if config.verbose {
        EnvFilter::new(file_filter.to_string())
    } else {
        EnvFilter::new("warn")
    }
}

//! Error types for host list ingestion

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Host source error type
#[derive(Error, Debug)]
pub enum HostSourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Spreadsheet error in {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Spreadsheet has no sheets: {0}")]
    NoSheets(PathBuf),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HostSourceError>;

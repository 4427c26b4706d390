//! Ivping core library
//!
//! Host list ingestion from the spreadsheet, data directory resolution and
//! the filter/sort view-model shared by the CLI and the TUI.

pub mod error;
pub mod host;
pub mod paths;
pub mod source;
pub mod table;

#[cfg(test)]
mod test_fixtures;

pub use error::{HostSourceError, Result};
pub use host::{find_host, HostColumn, HostRecord};
pub use paths::DataDir;
pub use source::{HostLoad, HostSource, RecoverableLoad};
pub use table::{HostTable, SortDirection, SortKey};

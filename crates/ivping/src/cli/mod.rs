//! CLI command implementations

pub mod actions;
pub mod config;
pub mod context;
pub mod error;
pub mod list;
pub mod output;
pub mod tui;


//! Ivping - Core Library
//!
//! Settings and the action dispatcher shared by the CLI commands and the TUI.

pub mod actions;
pub mod config;

pub use actions::{ActionDispatcher, ActionError, ActionSettings};
pub use config::{AppConfig, ConfigError};

//! Helpful error types for CLI commands
//!
//! Each error says what went wrong, where, and what to try next.

use std::fmt;
use std::path::Path;

use ivping::ConfigError;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(Into::into));
        self
    }

    /// No row matched the hostname or IP given on the command line
    pub fn host_not_found(query: &str, hosts_file: &Path) -> Self {
        Self::new(format!("Host not found: {}", query))
            .with_context(format!("Searched hostnames and IPs in {}", hosts_file.display()))
            .with_suggestions([
                format!("TRY: List matching hosts: ivping list --filter {}", query),
                "TRY: Hostnames match case-insensitively; IPs must match exactly".to_string(),
            ])
    }

    /// SSH gateway requested for something that is not a switch or router
    pub fn not_network_equipment(host: &str) -> Self {
        Self::new(format!("'{}' is not a switch or router", host))
            .with_context("The SSH gateway only serves hostnames starting with SW or RT")
            .with_suggestion(format!("TRY: Ping it instead: ivping ping {}", host))
    }

    pub fn config_invalid(path: &Path, err: &ConfigError) -> Self {
        Self::new(format!("Invalid settings file: {}", path.display()))
            .with_context(err.to_string())
            .with_suggestions([
                format!("TRY: Fix or remove {} to use defaults", path.display()),
                "TRY: Show effective settings: ivping config".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

//! Host actions: ping console, SSH web gateway, clipboard copy
//!
//! Each action is a single independent call. Processes are launched detached;
//! callers never wait on them and no result is read back.

pub mod clipboard;
pub mod launcher;
pub mod script;

use ivping_core::{HostColumn, HostRecord};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use clipboard::{ClipboardSink, SystemClipboard};
use launcher::{browser_command, terminal_command, LaunchCommand, Launcher, SystemLauncher};
use script::{PingScript, Platform};

/// Hostname prefixes of network equipment reachable through the gateway.
pub const NETWORK_EQUIPMENT_PREFIXES: [&str; 2] = ["SW", "RT"];

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No host selected")]
    NoSelection,

    #[error("SSH gateway is only available for network equipment (SW/RT); '{host}' is not")]
    NotNetworkEquipment { host: String },

    #[error("Host '{host}' has no IP address")]
    MissingAddress { host: String },

    #[error("Failed to write ping script {path}: {source}")]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

impl ActionError {
    /// Rejections caused by the selection rather than by the system.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ActionError::NoSelection
                | ActionError::NotNetworkEquipment { .. }
                | ActionError::MissingAddress { .. }
        )
    }
}

/// Settings the dispatcher needs, resolved from `AppConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSettings {
    pub ping_count: u32,
    pub terminal: Option<String>,
    pub gateway_base_url: String,
    pub script_dir: PathBuf,
    pub platform: Platform,
}

impl ActionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            ping_count: config.ping.count,
            terminal: config.ping.terminal.clone(),
            gateway_base_url: config.gateway.base_url.clone(),
            script_dir: std::env::temp_dir(),
            platform: Platform::current(),
        }
    }
}

/// A launched ping console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingLaunch {
    pub script_path: PathBuf,
    pub command: LaunchCommand,
}

/// SSH gateway is offered only for SW*/RT* hostnames (case-sensitive).
pub fn is_network_equipment(hostname: &str) -> bool {
    NETWORK_EQUIPMENT_PREFIXES
        .iter()
        .any(|prefix| hostname.starts_with(prefix))
}

/// Gateway URL: base followed by the raw hostname, no encoding.
pub fn gateway_url(base_url: &str, hostname: &str) -> String {
    format!("{}{}", base_url, hostname)
}

pub struct ActionDispatcher {
    settings: ActionSettings,
    launcher: Box<dyn Launcher>,
    clipboard: Box<dyn ClipboardSink>,
}

impl ActionDispatcher {
    pub fn new(
        settings: ActionSettings,
        launcher: Box<dyn Launcher>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            settings,
            launcher,
            clipboard,
        }
    }

    /// Dispatcher backed by real processes and the system clipboard.
    pub fn system(settings: ActionSettings) -> Self {
        Self::new(settings, Box::new(SystemLauncher), Box::new(SystemClipboard::new()))
    }

    pub fn settings(&self) -> &ActionSettings {
        &self.settings
    }

    /// Write the ping script and open it in a new terminal window.
    pub fn run_ping(&self, host: &HostRecord, continuous: bool) -> Result<PingLaunch, ActionError> {
        if host.ip().trim().is_empty() {
            warn!(host = %host.host(), "Ping rejected: no IP address");
            return Err(ActionError::MissingAddress {
                host: host.host().to_string(),
            });
        }

        let flavor = self.settings.platform.script_flavor();
        let content = PingScript::new(host, continuous)
            .with_count(self.settings.ping_count)
            .render(flavor);
        let script_path = self.settings.script_dir.join(flavor.file_name());

        write_script(&script_path, &content).map_err(|source| ActionError::ScriptWrite {
            path: script_path.clone(),
            source,
        })?;

        let command = terminal_command(
            self.settings.platform,
            &script_path,
            self.settings.terminal.as_deref(),
        );
        self.launch(&command)?;

        info!(
            host = %host.host(),
            ip = %host.ip(),
            continuous,
            script = %script_path.display(),
            "Ping console launched"
        );
        Ok(PingLaunch {
            script_path,
            command,
        })
    }

    /// Open the SSH web gateway for a network-equipment host.
    ///
    /// Returns the URL that was opened.
    pub fn open_ssh_gateway(&self, host: &HostRecord) -> Result<String, ActionError> {
        if !is_network_equipment(host.host()) {
            warn!(host = %host.host(), "SSH gateway rejected: not network equipment");
            return Err(ActionError::NotNetworkEquipment {
                host: host.host().to_string(),
            });
        }

        let url = gateway_url(&self.settings.gateway_base_url, host.host());
        self.launch(&browser_command(self.settings.platform, &url))?;
        info!(host = %host.host(), url = %url, "SSH gateway opened");
        Ok(url)
    }

    /// Copy one field of the host to the clipboard; returns the copied text.
    pub fn copy_field(&mut self, host: &HostRecord, column: HostColumn) -> Result<String, ActionError> {
        let text = host.field(column).to_string();
        self.clipboard.set_text(&text)?;
        info!(host = %host.host(), field = %column, "Copied to clipboard");
        Ok(text)
    }

    fn launch(&self, command: &LaunchCommand) -> Result<(), ActionError> {
        self.launcher
            .spawn_detached(command)
            .map_err(|source| ActionError::Launch {
                command: command.to_string(),
                source,
            })
    }
}

fn write_script(path: &std::path::Path, content: &str) -> io::Result<()> {
    std::fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

//! Detached process launching (terminal windows, browser)

use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use tracing::debug;

use super::script::Platform;

const DEFAULT_UNIX_TERMINAL: &str = "x-terminal-emulator";

/// A program invocation, kept as data so it can be logged and tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Starts a child process without waiting on it or reading its output.
pub trait Launcher {
    fn spawn_detached(&self, command: &LaunchCommand) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn spawn_detached(&self, command: &LaunchCommand) -> io::Result<()> {
        spawn_reaped(command).map(drop)
    }
}

/// Spawn `command` and reap it on a background thread, so short-lived
/// launchers such as `xdg-open` do not linger as zombies.
fn spawn_reaped(command: &LaunchCommand) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let program = command.program.clone();
    Ok(thread::spawn(move || {
        let status = child.wait();
        debug!(program = %program, status = ?status, "Launched process exited");
        status
    }))
}

/// Command that runs `script` in a new terminal window.
pub fn terminal_command(platform: Platform, script: &Path, terminal: Option<&str>) -> LaunchCommand {
    let script = script.display().to_string();
    match platform {
        // Empty first argument is the window title, so a quoted path is
        // not mistaken for one.
        Platform::Windows => LaunchCommand::new("cmd", ["/C", "start", "", script.as_str()]),
        Platform::MacOs => LaunchCommand::new("open", ["-a", "Terminal", script.as_str()]),
        Platform::Unix => LaunchCommand::new(
            terminal.unwrap_or(DEFAULT_UNIX_TERMINAL),
            ["-e", script.as_str()],
        ),
    }
}

/// Command that opens `url` with the default browser.
pub fn browser_command(platform: Platform, url: &str) -> LaunchCommand {
    match platform {
        Platform::Windows => LaunchCommand::new("rundll32", ["url.dll,FileProtocolHandler", url]),
        Platform::MacOs => LaunchCommand::new("open", [url]),
        Platform::Unix => LaunchCommand::new("xdg-open", [url]),
    }
}

//! Ping console scripts
//!
//! A script sets the console title, runs the native ping against the host's
//! IP, then waits for the user before closing the window.

use ivping_core::HostRecord;

use crate::config::DEFAULT_PING_COUNT;

/// Host operating system family, for script and launcher selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    pub fn script_flavor(&self) -> ScriptFlavor {
        match self {
            Platform::Windows => ScriptFlavor::Batch,
            Platform::MacOs | Platform::Unix => ScriptFlavor::Posix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFlavor {
    /// cmd.exe batch file
    Batch,
    /// /bin/sh script
    Posix,
}

impl ScriptFlavor {
    /// Fixed file name; each ping overwrites the previous script.
    pub fn file_name(&self) -> &'static str {
        match self {
            ScriptFlavor::Batch => "ping_test.bat",
            ScriptFlavor::Posix => "ping_test.sh",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PingScript<'a> {
    host: &'a HostRecord,
    continuous: bool,
    count: u32,
}

impl<'a> PingScript<'a> {
    pub fn new(host: &'a HostRecord, continuous: bool) -> Self {
        Self {
            host,
            continuous,
            count: DEFAULT_PING_COUNT,
        }
    }

    /// Echo requests for a bounded run (ignored when continuous).
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count.max(1);
        self
    }

    pub fn title(&self) -> String {
        format!("Ping  {}  [{}]", self.host.host(), self.host.ip())
    }

    pub fn render(&self, flavor: ScriptFlavor) -> String {
        match flavor {
            ScriptFlavor::Batch => self.render_batch(),
            ScriptFlavor::Posix => self.render_posix(),
        }
    }

    fn render_batch(&self) -> String {
        let ip = batch_escape(self.host.ip());
        let ping = if self.continuous {
            format!("@ping -t {}", ip)
        } else {
            format!("@ping -n {} {}", self.count, ip)
        };
        let lines = [
            "@echo off".to_string(),
            "@cls".to_string(),
            "@color 17".to_string(),
            format!("@title {}", batch_escape(&self.title())),
            ping,
            "@pause".to_string(),
            "@exit".to_string(),
        ];
        let mut script = lines.join("\r\n");
        script.push_str("\r\n");
        script
    }

    fn render_posix(&self) -> String {
        let ip = sh_quote(self.host.ip());
        let ping = if self.continuous {
            format!("ping {}", ip)
        } else {
            format!("ping -c {} {}", self.count, ip)
        };
        let lines = [
            "#!/bin/sh".to_string(),
            "clear".to_string(),
            format!("printf '\\033]0;%s\\007' {}", sh_quote(&self.title())),
            ping,
            "printf '\\nPress Enter to close...'".to_string(),
            "read -r _".to_string(),
            "exit 0".to_string(),
        ];
        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}

fn strip_line_breaks(value: &str) -> String {
    value.chars().filter(|ch| *ch != '\r' && *ch != '\n').collect()
}

/// Escape cmd.exe metacharacters so spreadsheet text cannot chain commands.
fn batch_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in strip_line_breaks(value).chars() {
        match ch {
            '^' | '&' | '|' | '<' | '>' => {
                out.push('^');
                out.push(ch);
            }
            '%' => out.push_str("%%"),
            _ => out.push(ch),
        }
    }
    out
}

/// Single-quote for /bin/sh.
fn sh_quote(value: &str) -> String {
    format!("'{}'", strip_line_breaks(value).replace('\'', "'\\''"))
}

//! Ivping Test Utilities
//!
//! Fakes for the process launcher and the clipboard, so actions can be
//! exercised without opening terminals or browsers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ivping_test_utils::unix_dispatcher;
//!
//! let (dispatcher, launcher, _) = unix_dispatcher(tmp.path());
//! dispatcher.open_ssh_gateway(&host)?;
//! assert_eq!(launcher.launched.borrow().len(), 1);
//! ```

use ivping::actions::clipboard::ClipboardSink;
use ivping::actions::launcher::{LaunchCommand, Launcher};
use ivping::actions::script::Platform;
use ivping::{ActionDispatcher, ActionSettings};
use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;

pub const GATEWAY_BASE_URL: &str = "https://gw.example/cgi-bin/ssh.sh?";

/// Launcher that records commands instead of running them.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    pub launched: Rc<RefCell<Vec<LaunchCommand>>>,
    pub fail: bool,
}

impl RecordingLauncher {
    /// A launcher whose every spawn fails with `NotFound`.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Launcher for RecordingLauncher {
    fn spawn_detached(&self, command: &LaunchCommand) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
        }
        self.launched.borrow_mut().push(command.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub copied: Rc<RefCell<Vec<String>>>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Settings writing scripts into `dir` for the given platform.
pub fn settings_in(dir: &Path, platform: Platform) -> ActionSettings {
    ActionSettings {
        ping_count: 8,
        terminal: None,
        gateway_base_url: GATEWAY_BASE_URL.to_string(),
        script_dir: dir.to_path_buf(),
        platform,
    }
}

pub fn recording_dispatcher(
    settings: ActionSettings,
) -> (ActionDispatcher, RecordingLauncher, RecordingClipboard) {
    let launcher = RecordingLauncher::default();
    let clipboard = RecordingClipboard::default();
    let dispatcher = ActionDispatcher::new(
        settings,
        Box::new(launcher.clone()),
        Box::new(clipboard.clone()),
    );
    (dispatcher, launcher, clipboard)
}

/// Recording dispatcher on the unix flavor, scripts under `dir`.
pub fn unix_dispatcher(dir: &Path) -> (ActionDispatcher, RecordingLauncher, RecordingClipboard) {
    recording_dispatcher(settings_in(dir, Platform::Unix))
}

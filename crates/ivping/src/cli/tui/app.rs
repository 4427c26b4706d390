//! Application state for the TUI

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ivping::{ActionDispatcher, ActionError};
use ivping_core::{HostColumn, HostRecord, HostSource, HostTable, RecoverableLoad};
use std::time::{Duration, Instant};
use tracing::info;

/// How long a global status message stays visible
pub const STATUS_TTL: Duration = Duration::from_secs(4);
/// Rows moved by PgUp/PgDn
pub const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Warning,
    Error,
}

/// Modal dialog on top of the table; it takes all key input while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Message {
        kind: MessageKind,
        title: String,
        body: String,
    },
    ConfirmQuit,
    /// Copy hostname, IP or location of the selected host
    CopyMenu,
    Help,
    About,
}

/// Global status message shown under the table.
#[derive(Debug, Clone)]
pub struct GlobalStatusMessage {
    pub message: String,
    pub is_error: bool,
    pub expires_at: Instant,
}

pub struct App {
    pub table: HostTable,
    pub search_focused: bool,
    /// Ping until the console is closed instead of a fixed count
    pub continuous: bool,
    pub dialog: Option<Dialog>,
    pub global_status: Option<GlobalStatusMessage>,
    /// Problem from the last spreadsheet load; stays until the next reload
    pub load_notice: Option<String>,
    pub running: bool,
    source: HostSource,
    dispatcher: ActionDispatcher,
}

enum TextInputResult {
    Done,
    Changed,
    NotHandled,
}

/// Apply an editing key to a single-line text field.
fn handle_text_input(key: KeyEvent, input: &mut String) -> TextInputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => TextInputResult::Done,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.clear();
            TextInputResult::Changed
        }
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => TextInputResult::NotHandled,
        KeyCode::Char(c) => {
            input.push(c);
            TextInputResult::Changed
        }
        KeyCode::Backspace => {
            input.pop();
            TextInputResult::Changed
        }
        _ => TextInputResult::NotHandled,
    }
}

impl App {
    /// Load the spreadsheet and build the initial state.
    pub fn new(source: HostSource, dispatcher: ActionDispatcher) -> Self {
        let load = source.load_recoverable();
        Self::from_load(source, dispatcher, load)
    }

    pub fn from_load(source: HostSource, dispatcher: ActionDispatcher, load: RecoverableLoad) -> Self {
        Self {
            table: HostTable::new(load.hosts),
            search_focused: false,
            continuous: false,
            dialog: None,
            global_status: None,
            load_notice: load.notice,
            running: true,
            source,
            dispatcher,
        }
    }

    pub fn hosts_path(&self) -> &std::path::Path {
        self.source.path()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(dialog) = self.dialog.take() {
            self.handle_dialog_key(dialog, key);
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.dialog = Some(Dialog::ConfirmQuit);
            return;
        }

        if self.search_focused {
            self.handle_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('x') => self.table.set_filter_text(""),
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(),
            KeyCode::PageUp => self.table.page_up(PAGE_ROWS),
            KeyCode::PageDown => self.table.page_down(PAGE_ROWS),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(),
            KeyCode::Char(digit @ '1'..='3') => {
                let column = HostColumn::ALL[(digit as u8 - b'1') as usize];
                self.table.toggle_sort(column);
            }
            KeyCode::Char('c') => self.toggle_continuous(),
            KeyCode::Char('p') | KeyCode::Enter => self.ping_selected(),
            KeyCode::Char('s') => self.ssh_selected(),
            KeyCode::Char('y') => {
                if self.table.selected().is_some() {
                    self.dialog = Some(Dialog::CopyMenu);
                } else {
                    self.show_action_error(ActionError::NoSelection);
                }
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('?') => self.dialog = Some(Dialog::Help),
            KeyCode::Char('a') => self.dialog = Some(Dialog::About),
            KeyCode::Char('q') | KeyCode::Esc => self.dialog = Some(Dialog::ConfirmQuit),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut text = self.table.filter_text().to_string();
        match handle_text_input(key, &mut text) {
            TextInputResult::Done => self.search_focused = false,
            TextInputResult::Changed => self.table.set_filter_text(text),
            TextInputResult::NotHandled => match key.code {
                KeyCode::Up => self.table.select_prev(),
                KeyCode::Down => self.table.select_next(),
                KeyCode::PageUp => self.table.page_up(PAGE_ROWS),
                KeyCode::PageDown => self.table.page_down(PAGE_ROWS),
                _ => {}
            },
        }
    }

    fn handle_dialog_key(&mut self, dialog: Dialog, key: KeyEvent) {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        match dialog {
            Dialog::ConfirmQuit => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.quit(),
                _ if ctrl_c => self.quit(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.dialog = Some(Dialog::ConfirmQuit),
            },
            Dialog::CopyMenu => match key.code {
                KeyCode::Char('h') => self.copy_selected(HostColumn::Host),
                KeyCode::Char('i') => self.copy_selected(HostColumn::Ip),
                KeyCode::Char('l') => self.copy_selected(HostColumn::Location),
                KeyCode::Esc | KeyCode::Char('y') | KeyCode::Char('q') => {}
                _ => self.dialog = Some(Dialog::CopyMenu),
            },
            Dialog::Help => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {}
                _ => self.dialog = Some(Dialog::Help),
            },
            Dialog::About => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('a') | KeyCode::Char('q') => {}
                _ => self.dialog = Some(Dialog::About),
            },
            message @ Dialog::Message { .. } => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q') => {}
                _ => self.dialog = Some(message),
            },
        }
    }

    /// Expire the global status message.
    pub fn tick(&mut self) {
        if let Some(status) = &self.global_status {
            if Instant::now() >= status.expires_at {
                self.global_status = None;
            }
        }
    }

    pub fn reload(&mut self) {
        let load = self.source.load_recoverable();
        let count = load.hosts.len();
        self.table.replace_hosts(load.hosts);
        self.load_notice = load.notice;
        info!(hosts = count, "Host list reloaded");
        self.set_status(format!("Loaded {} host(s)", count), false);
    }

    fn quit(&mut self) {
        self.running = false;
    }

    fn toggle_continuous(&mut self) {
        self.continuous = !self.continuous;
        let mode = if self.continuous { "on" } else { "off" };
        self.set_status(format!("Continuous ping {}", mode), false);
    }

    fn selected_host(&self) -> Result<HostRecord, ActionError> {
        self.table.selected().cloned().ok_or(ActionError::NoSelection)
    }

    fn ping_selected(&mut self) {
        let result = self
            .selected_host()
            .and_then(|host| self.dispatcher.run_ping(&host, self.continuous).map(|_| host));
        match result {
            Ok(host) => {
                let mode = if self.continuous {
                    "continuous".to_string()
                } else {
                    format!("{} echoes", self.dispatcher.settings().ping_count)
                };
                self.set_status(format!("Pinging {} [{}] ({})", host.host(), host.ip(), mode), false);
            }
            Err(err) => self.show_action_error(err),
        }
    }

    fn ssh_selected(&mut self) {
        match self
            .selected_host()
            .and_then(|host| self.dispatcher.open_ssh_gateway(&host))
        {
            Ok(url) => self.set_status(format!("Opened {}", url), false),
            Err(err) => self.show_action_error(err),
        }
    }

    fn copy_selected(&mut self, column: HostColumn) {
        let host = match self.selected_host() {
            Ok(host) => host,
            Err(err) => return self.show_action_error(err),
        };
        match self.dispatcher.copy_field(&host, column) {
            Ok(text) => self.set_status(format!("Copied {}: {}", column.label(), text), false),
            Err(err) => self.set_status(err.to_string(), true),
        }
    }

    fn show_action_error(&mut self, err: ActionError) {
        let (kind, title) = if err.is_warning() {
            (MessageKind::Warning, "Warning")
        } else {
            (MessageKind::Error, "Error")
        };
        self.dialog = Some(Dialog::Message {
            kind,
            title: title.to_string(),
            body: err.to_string(),
        });
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.global_status = Some(GlobalStatusMessage {
            message: message.into(),
            is_error,
            expires_at: Instant::now() + STATUS_TTL,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivping_test_utils::{unix_dispatcher, RecordingClipboard, RecordingLauncher};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn hosts() -> Vec<HostRecord> {
        vec![
            HostRecord::new("SW-01", "10.0.0.1", "A"),
            HostRecord::new("PC-02", "10.0.0.2", "B"),
            HostRecord::new("RT-07", "10.0.1.7", "C"),
        ]
    }

    struct Harness {
        app: App,
        launcher: RecordingLauncher,
        clipboard: RecordingClipboard,
        _tmp: tempfile::TempDir,
    }

    fn harness_with(hosts: Vec<HostRecord>) -> Harness {
        let tmp = tempfile::tempdir().unwrap();
        let (dispatcher, launcher, clipboard) = unix_dispatcher(tmp.path());
        let source = HostSource::new(tmp.path().join("data_hosts.xlsx"));
        let load = RecoverableLoad { hosts, notice: None };
        Harness {
            app: App::from_load(source, dispatcher, load),
            launcher,
            clipboard,
            _tmp: tmp,
        }
    }

    fn harness() -> Harness {
        harness_with(hosts())
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.table.visible().map(|h| h.host().to_string()).collect()
    }

    #[test]
    fn test_starts_with_first_row_selected() {
        let h = harness();
        assert!(h.app.running);
        assert_eq!(h.app.table.selected().unwrap().host(), "SW-01");
        assert!(!h.app.continuous);
    }

    #[test]
    fn test_search_typing_filters() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('/')));
        assert!(h.app.search_focused);

        type_text(&mut h.app, "10.0.0");
        assert_eq!(visible_names(&h.app), vec!["SW-01", "PC-02"]);

        // letters typed into the search box are not commands
        type_text(&mut h.app, "q");
        assert!(h.app.dialog.is_none());
        assert!(visible_names(&h.app).is_empty());

        h.app.handle_key(key(KeyCode::Backspace));
        assert_eq!(h.app.table.visible_len(), 2);

        h.app.handle_key(ctrl('u'));
        assert_eq!(h.app.table.filter_text(), "");
        assert_eq!(h.app.table.visible_len(), 3);

        h.app.handle_key(key(KeyCode::Esc));
        assert!(!h.app.search_focused);
        assert!(h.app.dialog.is_none());
    }

    #[test]
    fn test_clear_search_key() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut h.app, "rt");
        h.app.handle_key(key(KeyCode::Enter));
        assert_eq!(visible_names(&h.app), vec!["RT-07"]);

        h.app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(h.app.table.visible_len(), 3);
    }

    #[test]
    fn test_sort_keys_cycle() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(visible_names(&h.app), vec!["PC-02", "RT-07", "SW-01"]);
        h.app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(visible_names(&h.app), vec!["SW-01", "RT-07", "PC-02"]);
        h.app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(visible_names(&h.app), vec!["SW-01", "PC-02", "RT-07"]);
    }

    #[test]
    fn test_navigation() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(h.app.table.selected().unwrap().host(), "PC-02");
        h.app.handle_key(key(KeyCode::End));
        assert_eq!(h.app.table.selected().unwrap().host(), "RT-07");
        h.app.handle_key(key(KeyCode::Up));
        assert_eq!(h.app.table.selected().unwrap().host(), "PC-02");
        h.app.handle_key(key(KeyCode::Home));
        assert_eq!(h.app.table.selected().unwrap().host(), "SW-01");
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(h.app.dialog, Some(Dialog::ConfirmQuit));
        assert!(h.app.running);

        h.app.handle_key(key(KeyCode::Char('n')));
        assert!(h.app.dialog.is_none());
        assert!(h.app.running);

        h.app.handle_key(ctrl('c'));
        assert_eq!(h.app.dialog, Some(Dialog::ConfirmQuit));
        h.app.handle_key(key(KeyCode::Char('y')));
        assert!(!h.app.running);
    }

    #[test]
    fn test_ping_launches_with_mode() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('c')));
        assert!(h.app.continuous);
        h.app.handle_key(key(KeyCode::Enter));

        assert_eq!(h.launcher.launched.borrow().len(), 1);
        assert!(h.app.dialog.is_none());
        let status = h.app.global_status.as_ref().unwrap();
        assert!(status.message.contains("SW-01"));
        assert!(status.message.contains("continuous"));
        assert!(!status.is_error);
    }

    #[test]
    fn test_ping_without_selection_warns() {
        let mut h = harness_with(Vec::new());
        h.app.handle_key(key(KeyCode::Char('p')));

        assert!(h.launcher.launched.borrow().is_empty());
        match &h.app.dialog {
            Some(Dialog::Message { kind, body, .. }) => {
                assert_eq!(*kind, MessageKind::Warning);
                assert!(body.contains("No host selected"));
            }
            other => panic!("unexpected dialog: {:?}", other),
        }

        h.app.handle_key(key(KeyCode::Enter));
        assert!(h.app.dialog.is_none());
    }

    #[test]
    fn test_ssh_on_workstation_warns() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Down));
        h.app.handle_key(key(KeyCode::Char('s')));

        assert!(h.launcher.launched.borrow().is_empty());
        assert!(matches!(
            h.app.dialog,
            Some(Dialog::Message {
                kind: MessageKind::Warning,
                ..
            })
        ));
    }

    #[test]
    fn test_ssh_on_router_opens_gateway() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::End));
        h.app.handle_key(key(KeyCode::Char('s')));

        let launched = h.launcher.launched.borrow();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].args, vec!["https://gw.example/cgi-bin/ssh.sh?RT-07"]);
    }

    #[test]
    fn test_copy_menu() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(h.app.dialog, Some(Dialog::CopyMenu));

        // unrelated keys keep the menu open
        h.app.handle_key(key(KeyCode::Char('z')));
        assert_eq!(h.app.dialog, Some(Dialog::CopyMenu));

        h.app.handle_key(key(KeyCode::Char('i')));
        assert!(h.app.dialog.is_none());
        assert_eq!(*h.clipboard.copied.borrow(), vec!["10.0.0.1"]);
    }

    #[test]
    fn test_help_and_about_dialogs() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(h.app.dialog, Some(Dialog::Help));
        h.app.handle_key(key(KeyCode::Char('?')));
        assert!(h.app.dialog.is_none());

        h.app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(h.app.dialog, Some(Dialog::About));
        h.app.handle_key(key(KeyCode::Esc));
        assert!(h.app.dialog.is_none());
        assert!(h.app.running);
    }

    #[test]
    fn test_reload_missing_file_keeps_running() {
        let mut h = harness();
        h.app.handle_key(key(KeyCode::Char('r')));
        assert!(h.app.table.is_empty());
        assert!(h.app.load_notice.as_deref().unwrap().contains("not found"));
        assert!(h.app.running);
    }

    #[test]
    fn test_status_expires() {
        let mut h = harness();
        h.app.set_status("hello", false);
        h.app.tick();
        assert!(h.app.global_status.is_some());

        if let Some(status) = h.app.global_status.as_mut() {
            status.expires_at = Instant::now() - Duration::from_millis(1);
        }
        h.app.tick();
        assert!(h.app.global_status.is_none());
    }
}

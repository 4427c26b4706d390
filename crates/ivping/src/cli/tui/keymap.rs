use super::app::{App, Dialog};
use super::components::action_bar::ActionHint;

fn ordered_hints(items: &[(&'static str, &'static str)]) -> Vec<ActionHint> {
    let mut priority: i16 = 100;
    items
        .iter()
        .map(|(key, label)| {
            let hint = ActionHint::new(*key, *label, priority.max(1) as u8);
            priority -= 5;
            hint
        })
        .collect()
}

/// Hints for the bottom bar in the current state.
pub fn action_hints(app: &App) -> Vec<ActionHint> {
    match &app.dialog {
        Some(Dialog::ConfirmQuit) => ordered_hints(&[("y", "Quit"), ("n/Esc", "Stay")]),
        Some(Dialog::CopyMenu) => ordered_hints(&[
            ("h", "Hostname"),
            ("i", "IP"),
            ("l", "Location"),
            ("Esc", "Cancel"),
        ]),
        Some(_) => ordered_hints(&[("Esc", "Close")]),
        None if app.search_focused => ordered_hints(&[
            ("Enter/Esc", "Done"),
            ("Ctrl+U", "Clear"),
            ("Up/Down", "Move"),
        ]),
        None => table_hints(app),
    }
}

fn table_hints(app: &App) -> Vec<ActionHint> {
    let has_selection = app.table.selected().is_some();
    let hints = ordered_hints(&[
        ("p", "Ping"),
        ("s", "SSH"),
        ("/", "Search"),
        ("c", "Continuous"),
        ("y", "Copy"),
        ("1-3", "Sort"),
        ("r", "Reload"),
        ("q", "Quit"),
        ("?", "Help"),
    ]);
    // Host actions are greyed out when nothing is selected
    hints
        .into_iter()
        .map(|hint| {
            let needs_host = matches!(hint.key.as_ref(), "p" | "s" | "y");
            hint.with_enabled(!needs_host || has_selection)
        })
        .collect()
}

/// Every binding, for the help dialog.
pub fn help_hints() -> Vec<ActionHint> {
    ordered_hints(&[
        ("/", "Focus search (Enter/Esc to leave, Ctrl+U to clear)"),
        ("x", "Clear search"),
        ("Up/Down j/k", "Move selection"),
        ("PgUp/PgDn", "Move by page"),
        ("Home/End", "First / last host"),
        ("1 2 3", "Sort by Host, IP, Location (asc, desc, off)"),
        ("p/Enter", "Ping selected host"),
        ("c", "Toggle continuous ping"),
        ("s", "Open SSH gateway (SW/RT hosts)"),
        ("y", "Copy hostname, IP or location"),
        ("r", "Reload spreadsheet"),
        ("a", "About"),
        ("?", "Toggle this help"),
        ("q/Esc", "Quit"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_hints_priorities_descend() {
        let hints = ordered_hints(&[("a", "A"), ("b", "B"), ("c", "C")]);
        assert_eq!(hints[0].priority, 100);
        assert_eq!(hints[1].priority, 95);
        assert_eq!(hints[2].priority, 90);
    }

    #[test]
    fn test_host_actions_disabled_without_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let (dispatcher, _, _) = ivping_test_utils::unix_dispatcher(tmp.path());
        let load = ivping_core::RecoverableLoad::default();
        let app = App::from_load(ivping_core::HostSource::new(tmp.path().join("h.xlsx")), dispatcher, load);

        let hints = action_hints(&app);
        let ping = hints.iter().find(|hint| hint.key == "p").unwrap();
        let search = hints.iter().find(|hint| hint.key == "/").unwrap();
        assert!(!ping.enabled);
        assert!(search.enabled);
    }

    #[test]
    fn test_help_covers_actions() {
        let keys: Vec<String> = help_hints().iter().map(|hint| hint.key.to_string()).collect();
        for key in ["/", "p/Enter", "s", "y", "r", "q/Esc"] {
            assert!(keys.iter().any(|k| k == key), "missing {}", key);
        }
    }
}

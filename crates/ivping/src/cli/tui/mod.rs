//! Terminal User Interface for Ivping
//!
//! A searchable, sortable host table with ping and SSH gateway actions.

pub mod app;
pub mod components;
pub mod event;
pub mod keymap;
pub mod ui;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use std::io::stdout;
use std::time::Duration;
use tracing::info;

use crate::cli::context::AppContext;
use app::App;
use event::{Event, EventHandler};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the TUI
pub fn run(ctx: &AppContext) -> Result<()> {
    // Load before taking over the screen so startup warnings reach the log
    let mut app = App::new(ctx.host_source(), ctx.dispatcher());
    info!(hosts = app.table.len(), "Starting TUI");

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);
    let result = run_app(&mut terminal, &mut app, &events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &EventHandler) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next()? {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {} // Ratatui handles resize
        }
    }
    Ok(())
}

//! Rendering for the host table screen

use ivping_core::HostColumn;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use super::app::{App, Dialog, MessageKind};
use super::components::action_bar::{format_help_lines, render_action_bar};
use super::components::modal::render_modal;
use super::keymap;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Hosts
            Constraint::Length(1), // Status
            Constraint::Length(3), // Action bar
        ])
        .split(area);

    draw_search(frame, app, chunks[0]);
    draw_hosts(frame, app, chunks[1]);
    draw_status(frame, app, chunks[2]);
    render_action_bar(frame, chunks[3], &keymap::action_hints(app), Style::default());

    if let Some(dialog) = &app.dialog {
        draw_dialog(frame, app, dialog, area);
    }
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled("Search: ", Style::default().fg(Color::Gray))];
    if app.table.filter_text().is_empty() && !app.search_focused {
        spans.push(Span::styled(
            "press / to search host, IP or location",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(app.table.filter_text().to_string()));
    }
    if app.search_focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let (mode, mode_style) = if app.continuous {
        (" Continuous ping: ON ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else {
        (" Continuous ping: off ", Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .title(Line::from(Span::styled(" Ivping ", Style::default().fg(Color::Cyan).bold())))
        .title(Line::from(Span::styled(mode, mode_style)).right_aligned())
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_hosts(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;
    let block = Block::default()
        .title(format!(" Hosts {}/{} ", table.visible_len(), table.len()))
        .borders(Borders::ALL);

    if table.visible_len() == 0 {
        let message = if table.is_empty() {
            format!("No hosts loaded from {}", app.hosts_path().display())
        } else {
            format!("No hosts match '{}'", table.filter_text())
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(HostColumn::ALL.iter().enumerate().map(|(idx, column)| {
        let marker = match table.sort() {
            Some(key) if key.column == *column => format!(" {}", key.direction.marker()),
            _ => String::new(),
        };
        Cell::from(format!("{} {}{}", idx + 1, column.label(), marker))
    }))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows = table.visible().map(|host| {
        Row::new(vec![
            Cell::from(host.host().to_string()),
            Cell::from(host.ip().to_string()),
            Cell::from(host.location().to_string()),
        ])
    });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Percentage(50),
    ];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(table.selected_index());
    frame.render_stateful_widget(widget, area, &mut state);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = &app.global_status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        Span::styled(format!(" {}", status.message), Style::default().fg(color))
    } else if let Some(notice) = &app.load_notice {
        Span::styled(format!(" {}", notice), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!(" {}", app.hosts_path().display()),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_dialog(frame: &mut Frame, app: &App, dialog: &Dialog, area: Rect) {
    match dialog {
        Dialog::Message { kind, title, body } => {
            let color = match kind {
                MessageKind::Warning => Color::Yellow,
                MessageKind::Error => Color::Red,
            };
            let layout = render_modal(frame, area, 60, 8, title, Style::default().fg(color));
            frame.render_widget(Paragraph::new(body.as_str()).wrap(Wrap { trim: true }), layout.body);
            draw_footer(frame, layout.footer, "[Enter] OK");
        }
        Dialog::ConfirmQuit => {
            let layout = render_modal(frame, area, 40, 5, "Quit", Style::default().fg(Color::Yellow));
            frame.render_widget(
                Paragraph::new("Close Ivping?").alignment(Alignment::Center),
                layout.body,
            );
            draw_footer(frame, layout.footer, "[y] Yes  [n] No");
        }
        Dialog::CopyMenu => {
            let host = app.table.selected();
            let lines: Vec<Line> = [('h', HostColumn::Host), ('i', HostColumn::Ip), ('l', HostColumn::Location)]
                .iter()
                .map(|(key, column)| {
                    let value = host.map(|h| h.field(*column)).unwrap_or_default();
                    Line::from(vec![
                        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Cyan).bold()),
                        Span::raw(format!("{:<9}", column.label())),
                        Span::styled(value.to_string(), Style::default().fg(Color::Gray)),
                    ])
                })
                .collect();
            let layout = render_modal(frame, area, 50, 7, "Copy", Style::default().fg(Color::Cyan));
            frame.render_widget(Paragraph::new(lines), layout.body);
            draw_footer(frame, layout.footer, "[Esc] Cancel");
        }
        Dialog::Help => {
            let lines: Vec<Line> = format_help_lines(&keymap::help_hints())
                .into_iter()
                .map(Line::from)
                .collect();
            let height = lines.len() as u16 + 3;
            let layout = render_modal(frame, area, 70, height, "Keys", Style::default().fg(Color::Cyan));
            frame.render_widget(Paragraph::new(lines), layout.body);
            draw_footer(frame, layout.footer, "[Esc] Close");
        }
        Dialog::About => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Ivping {}", env!("CARGO_PKG_VERSION")),
                    Style::default().bold(),
                )),
                Line::from("Ping hosts and open the SSH gateway"),
                Line::from("from a spreadsheet host list."),
                Line::from(""),
                Line::from(Span::styled(
                    app.hosts_path().display().to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let layout = render_modal(frame, area, 60, 8, "About", Style::default().fg(Color::Cyan));
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                layout.body,
            );
            draw_footer(frame, layout.footer, "[Esc] Close");
        }
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

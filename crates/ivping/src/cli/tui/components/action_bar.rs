use std::borrow::Cow;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// A key hint in the bottom bar, e.g. `[p] Ping`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHint {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub enabled: bool,
    /// Lower priorities are dropped first when the bar is too narrow
    pub priority: u8,
}

impl ActionHint {
    pub fn new(key: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>, priority: u8) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: true,
            priority,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn width(&self) -> usize {
        // "[key] label"
        self.key.chars().count() + 3 + self.label.chars().count()
    }
}

const GAP: &str = "  ";
const MORE_INDICATOR: &str = "(? more)";

pub fn render_action_bar(frame: &mut Frame, area: Rect, hints: &[ActionHint], style: Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let max_lines = inner.height.min(2) as usize;
    let (lines, dropped) = fit_hints(hints, inner.width as usize, max_lines);

    let mut rendered: Vec<Line> = lines
        .iter()
        .map(|line| {
            let mut spans = Vec::new();
            for (pos, idx) in line.iter().enumerate() {
                if pos > 0 {
                    spans.push(Span::raw(GAP));
                }
                spans.extend(hint_spans(&hints[*idx], style));
            }
            Line::from(spans)
        })
        .collect();
    if dropped {
        if let Some(last) = rendered.last_mut() {
            last.push_span(Span::raw(GAP));
            last.push_span(Span::styled(MORE_INDICATOR, Style::default().fg(Color::DarkGray)));
        }
    }

    frame.render_widget(Paragraph::new(rendered).alignment(Alignment::Center), inner);
}

/// Help dialog lines with keys padded to a common width.
pub fn format_help_lines(hints: &[ActionHint]) -> Vec<String> {
    let key_width = hints
        .iter()
        .map(|hint| hint.key.chars().count())
        .max()
        .unwrap_or(0);
    hints
        .iter()
        .map(|hint| format!("  {:<width$}  {}", hint.key, hint.label, width = key_width))
        .collect()
}

/// Pack hints into at most `max_lines` lines of `width` columns, dropping
/// the lowest-priority hints until they fit. Returns the hint indices per
/// line and whether anything was dropped.
fn fit_hints(hints: &[ActionHint], width: usize, max_lines: usize) -> (Vec<Vec<usize>>, bool) {
    let mut active: Vec<usize> = (0..hints.len()).collect();
    let mut dropped = false;

    loop {
        let reserve = if dropped { GAP.len() + MORE_INDICATOR.len() } else { 0 };
        if let Some(lines) = pack(hints, &active, width, max_lines, reserve) {
            return (lines, dropped);
        }
        // Among equal priorities the later hint goes first
        let Some(pos) = active
            .iter()
            .enumerate()
            .min_by_key(|(_, idx)| (hints[**idx].priority, std::cmp::Reverse(**idx)))
            .map(|(pos, _)| pos)
        else {
            return (Vec::new(), dropped);
        };
        active.remove(pos);
        dropped = true;
    }
}

fn pack(
    hints: &[ActionHint],
    active: &[usize],
    width: usize,
    max_lines: usize,
    reserve: usize,
) -> Option<Vec<Vec<usize>>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0usize;

    for &idx in active {
        let item = hints[idx].width();
        let needed = if current.is_empty() { item } else { used + GAP.len() + item };
        if needed <= width {
            used = needed;
            current.push(idx);
            continue;
        }
        if current.is_empty() {
            return None;
        }
        lines.push(std::mem::take(&mut current));
        current.push(idx);
        used = item;
    }
    if !current.is_empty() || reserve > 0 {
        lines.push(current);
    }

    let last_fits = used + reserve <= width;
    (lines.len() <= max_lines && last_fits).then_some(lines)
}

fn hint_spans(hint: &ActionHint, base: Style) -> Vec<Span<'static>> {
    let (key_style, label_style) = if hint.enabled {
        (base.fg(Color::Cyan).add_modifier(Modifier::BOLD), base)
    } else {
        let dim = Style::default().fg(Color::DarkGray);
        (dim, dim)
    };

    vec![
        Span::styled(format!("[{}]", hint.key), key_style),
        Span::raw(" "),
        Span::styled(hint.label.clone(), label_style),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<ActionHint> {
        vec![
            ActionHint::new("p", "Ping", 100),
            ActionHint::new("s", "SSH", 90),
            ActionHint::new("?", "Help and keys", 10),
        ]
    }

    #[test]
    fn test_everything_fits_on_one_line() {
        let (lines, dropped) = fit_hints(&hints(), 80, 1);
        assert_eq!(lines, vec![vec![0, 1, 2]]);
        assert!(!dropped);
    }

    #[test]
    fn test_wraps_to_second_line() {
        // "[p] Ping" = 8, "[s] SSH" = 7, "[?] Help and keys" = 17
        let (lines, dropped) = fit_hints(&hints(), 17, 2);
        assert_eq!(lines, vec![vec![0, 1], vec![2]]);
        assert!(!dropped);
    }

    #[test]
    fn test_drops_lowest_priority_first() {
        let (lines, dropped) = fit_hints(&hints(), 30, 1);
        assert!(dropped);
        assert_eq!(lines, vec![vec![0, 1]]);
    }

    #[test]
    fn test_help_lines_aligned() {
        let lines = format_help_lines(&[ActionHint::new("Enter", "Ping", 1), ActionHint::new("s", "SSH", 1)]);
        assert_eq!(lines[0], "  Enter  Ping");
        assert_eq!(lines[1], "  s      SSH");
    }
}

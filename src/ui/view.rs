//! TUI rendering: header bar, monitors panel, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::AlertLevel;
use crate::ui::lines::{render_lines, LineToken};
use crate::ui::Theme;

/// Render the header bar with an aggregate alert overview.
///
/// Displays: status indicator, monitor counts by alert level, source.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(" PROCWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let (ok, warning, critical) = data.alert_counts();
    let total = data.monitors.len();

    // Overall status indicator
    let status_style = if critical > 0 {
        app.theme.alert_style(AlertLevel::Critical)
    } else if warning > 0 {
        app.theme.alert_style(AlertLevel::Warning)
    } else {
        app.theme.alert_style(AlertLevel::Ok)
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("PROCWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", ok), Style::default().fg(app.theme.ok)),
        Span::raw(" ok "),
        if warning > 0 {
            Span::styled(format!("{}", warning), Style::default().fg(app.theme.warning))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if critical > 0 {
            Span::styled(
                format!("{}", critical),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" crit │ "),
        Span::styled(format!("{}", total), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" monitors │ "),
        Span::raw(app.source_description().to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the monitors panel from the display token stream.
pub fn render_monitors(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.data {
        Some(ref data) => {
            let tokens = render_lines(data, app.monitors_disabled);
            tokens_to_text(tokens, &app.theme)
        }
        None => Vec::new(),
    };

    let shown = text.len();
    let title = if app.monitors_disabled {
        " Monitors (disabled) ".to_string()
    } else {
        format!(" Monitors ({} lines) ", shown)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Concatenate content tokens into styled lines, honoring break tokens as
/// hard newlines.
fn tokens_to_text(tokens: Vec<LineToken>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span> = Vec::new();

    for token in tokens {
        match token {
            LineToken::Content { text, style } => {
                let span = match style {
                    Some(level) => Span::styled(text, theme.alert_style(level)),
                    None => Span::raw(text),
                };
                spans.push(span);
            }
            LineToken::Padding { width } => {
                spans.push(Span::raw(" ".repeat(width)));
            }
            LineToken::Break => {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }
    }

    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }

    lines
}

/// Render the status bar at the bottom.
///
/// Shows: time since last update, available controls, load errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();
        format!(
            " Updated {:.1}s ago | r:refresh d:toggle monitors ?:help q:quit",
            elapsed.as_secs_f64(),
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the monitors panel.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Refresh now"),
        Line::from("  d         Toggle monitors display"),
        Line::from("  ?         Toggle this help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 10u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

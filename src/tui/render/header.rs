use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::helpers::spans_width;

/// Title row with pending count and server, separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25B6}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            " Approval Inbox",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let store = app.screen.store();
    if !store.loading() || !store.is_empty() {
        spans.push(Span::styled(
            format!("  {} pending", store.len()),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    // Server on the right, when it fits
    let used = spans_width(&spans);
    if used + 4 < width {
        let server = truncate_to_width(&app.base_url, (width - used - 4).min(48));
        let pad = width - used - spans_width(&[Span::raw(server.as_str())]) - 1;
        spans.push(Span::styled(" ".repeat(pad), bg_style));
        spans.push(Span::styled(server, Style::default().fg(app.theme.dim).bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), chunks[0]);

    let separator = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    frame.render_widget(Paragraph::new(Line::from(separator)).style(bg_style), chunks[1]);
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::inbox::Phase;
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::helpers::spans_width;

const NAV_HINT: &str = "a approve  x reject  n note  q qr  Enter detail  ? help";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let mut hint: Option<&str> = None;

    if app.mode == Mode::Search {
        // Search prompt: /pattern▌
        spans.push(Span::styled(
            format!("/{}", app.search_input),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        hint = Some("Enter filter  Esc cancel");
    } else if let Some(notice) = app.screen.notifications().last() {
        spans.push(Span::styled(
            format!(" {}", truncate_to_width(&notice.message, width.saturating_sub(2))),
            Style::default().fg(app.theme.notice_color(notice.level)).bg(bg),
        ));
    } else {
        let busy = match app.screen.phase() {
            Phase::Initial | Phase::Loading => Some("Loading approvals\u{2026}"),
            Phase::ActionPending => Some("Submitting decision\u{2026}"),
            Phase::Ready | Phase::Closed => None,
        };
        if let Some(busy) = busy {
            spans.push(Span::styled(
                format!(" {}", busy),
                Style::default().fg(app.theme.yellow).bg(bg),
            ));
        } else if let Some(pattern) = &app.last_search {
            spans.push(Span::styled(
                format!("/{}", pattern),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
            hint = Some("Esc clear filter");
        } else {
            hint = Some(NAV_HINT);
        }
    }

    // Right-aligned hint when it fits
    if let Some(hint) = hint {
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

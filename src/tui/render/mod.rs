pub mod confirm_popup;
pub mod detail_view;
pub mod header;
pub mod help_overlay;
pub mod helpers;
pub mod inbox_view;
pub mod qr_popup;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // list
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    inbox_view::render_inbox_view(frame, app, chunks[1]);

    // Modals, at most one visible; the confirmation dialog wins
    if app.screen.confirm().is_active() {
        confirm_popup::render_confirm_popup(frame, app, area);
    } else if app.screen.detail().is_some() {
        detail_view::render_detail_view(frame, app, area);
    } else if app.screen.qr().is_open() {
        qr_popup::render_qr_popup(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        if m.end() > m.start() {
            spans.push(Span::styled(
                text[m.start()..m.end()].to_string(),
                highlight_style,
            ));
        }
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn highlight_splits_at_matches() {
        let re = Regex::new("(?i)lap").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "New laptop",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["New ", "lap", "top"]);
    }

    #[test]
    fn full_screen_shows_header_list_and_hints() {
        let mut app = app_with_items(vec![item(1, "Leave"), item(2, "Laptop")]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &mut app);
        });
        assert!(output.contains("Approval Inbox"));
        assert!(output.contains("2 pending"));
        assert!(output.contains("Leave"));
        assert!(output.contains("Laptop"));
        assert!(output.contains("a approve"));
    }
}

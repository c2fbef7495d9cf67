use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::inbox::Phase;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::helpers::{short_timestamp, spans_width};
use super::push_highlighted_spans;

/// Rows per item: title, meta line, blank separator
const ITEM_ROWS: usize = 3;

/// Render the pending-approval list
pub fn render_inbox_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let message = |text: String| {
        Paragraph::new(format!(" {}", text)).style(Style::default().fg(app.theme.dim).bg(bg))
    };

    let items = app.visible_items();
    if items.is_empty() {
        let text = if app.screen.phase() == Phase::Loading || app.screen.phase() == Phase::Initial
        {
            "Loading approvals\u{2026}".to_string()
        } else if let Some(pattern) = &app.last_search
            && !app.screen.store().is_empty()
        {
            format!("No matches for /{}", pattern)
        } else {
            "No pending approvals.".to_string()
        };
        frame.render_widget(message(text), area);
        return;
    }

    // Keep the cursor on screen
    let per_page = (area.height as usize).div_ceil(ITEM_ROWS).max(1);
    let cursor = app.cursor.min(items.len() - 1);
    let mut scroll = app.scroll.min(cursor);
    if cursor >= scroll + per_page {
        scroll = cursor + 1 - per_page;
    }

    let search_re = app.active_search_re();
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let interactive = app.screen.is_interactive();
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, item) in items.iter().enumerate().skip(scroll) {
        let is_cursor = i == cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        if i > scroll {
            lines.push(Line::from(""));
        }

        // Marker + title
        let mut spans: Vec<Span> = Vec::new();
        let marker = if is_cursor { "\u{258E}" } else { " " };
        spans.push(Span::styled(
            marker,
            Style::default().fg(app.theme.selection_border).bg(row_bg),
        ));
        spans.push(Span::styled(
            format!("{:>3}  ", i + 1),
            Style::default().fg(app.theme.dim).bg(row_bg),
        ));
        let mut title_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
        if is_cursor {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        if !interactive {
            title_style = title_style.fg(app.theme.dim);
        }
        let budget = width.saturating_sub(spans_width(&spans) + 14);
        let title = truncate_to_width(&item.title, budget);
        push_highlighted_spans(&mut spans, &title, title_style, match_style, search_re.as_ref());

        // Progress on the right
        let progress = item.progress_label();
        let used = spans_width(&spans);
        if used + progress.len() + 1 < width {
            spans.push(Span::styled(
                " ".repeat(width - used - progress.len() - 1),
                Style::default().bg(row_bg),
            ));
            spans.push(Span::styled(
                progress,
                Style::default().fg(app.theme.cyan).bg(row_bg),
            ));
            spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        }
        lines.push(Line::from(spans));

        // Meta: request number, requester, submitted, status
        let meta_style = Style::default().fg(app.theme.dim).bg(bg);
        let mut meta: Vec<Span> = vec![Span::styled("      ", meta_style)];
        if !item.request_id.is_empty() {
            push_highlighted_spans(
                &mut meta,
                &item.request_id,
                meta_style,
                match_style,
                search_re.as_ref(),
            );
            meta.push(Span::styled(" \u{00B7} ", meta_style));
        }
        meta.push(Span::styled("by ", meta_style));
        push_highlighted_spans(
            &mut meta,
            &item.requested_by_id,
            meta_style,
            match_style,
            search_re.as_ref(),
        );
        meta.push(Span::styled(
            format!(" \u{00B7} {} \u{00B7} ", short_timestamp(&item.created_at)),
            meta_style,
        ));
        meta.push(Span::styled(
            item.status.clone(),
            Style::default().fg(app.theme.status_color(&item.status)).bg(bg),
        ));
        lines.push(Line::from(meta));

        if lines.len() >= area.height as usize {
            break;
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);

    app.cursor = cursor;
    app.scroll = scroll;
}

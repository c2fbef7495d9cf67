use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::Decision;
use crate::tui::app::App;
use crate::util::unicode::{tail_to_width, truncate_to_width};

use super::helpers::centered_rect_fixed;

/// Approve/reject dialog with the remark field
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pending) = app.screen.confirm().pending() else {
        return;
    };
    let submitting = app.screen.confirm().is_submitting();

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let accent = match pending.decision {
        Decision::Approved => app.theme.green,
        Decision::Rejected => app.theme.red,
    };
    let header_style = Style::default()
        .fg(accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {} request", pending.decision.verb()),
        header_style,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(&pending.item.title, inner_w.saturating_sub(1))),
        bright_style,
    )));
    lines.push(Line::from(Span::styled(
        format!(" {}", pending.item.progress_label()),
        dim_style,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Remark", text_style)));

    // Input line: end of the remark stays visible, caret after it
    let field_w = inner_w.saturating_sub(4);
    let mut input = vec![
        Span::styled(" \u{203A} ", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(tail_to_width(&pending.remark, field_w), bright_style),
    ];
    if !submitting {
        input.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    lines.push(Line::from(input));

    if let Some(error) = app.screen.confirm().validation_error() {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    }
    lines.push(Line::from(""));

    let hint = if submitting {
        " Submitting\u{2026}".to_string()
    } else {
        let other = match pending.decision {
            Decision::Approved => Decision::Rejected,
            Decision::Rejected => Decision::Approved,
        };
        format!(
            " Enter {}  Tab {}  Esc cancel",
            pending.decision.verb().to_lowercase(),
            other.verb().to_lowercase()
        )
    };
    lines.push(Line::from(Span::styled(hint, dim_style)));

    // Dynamic height from content + 2 for borders
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

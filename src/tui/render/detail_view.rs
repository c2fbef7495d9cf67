use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::inbox::DetailPane;
use crate::model::RequestDetail;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::wrap_words;

use super::helpers::{centered_rect_fixed, short_timestamp};

/// Render the request detail pane (header + approval chain)
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pane) = app.screen.detail() else {
        return;
    };

    let theme = &app.theme;
    let bg = theme.background;
    let popup_w: u16 = 68.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    match pane {
        DetailPane::Loading {
            approval_request_id,
        } => {
            lines.push(Line::from(Span::styled(
                format!(" Loading request {}\u{2026}", approval_request_id),
                dim_style,
            )));
        }
        DetailPane::NotFound { .. } => {
            lines.push(Line::from(Span::styled(
                " Request not found.",
                Style::default().fg(theme.red).bg(bg),
            )));
        }
        DetailPane::Loaded(detail) => detail_lines(&mut lines, detail, theme, inner_w),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Esc close", dim_style)));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn detail_lines(lines: &mut Vec<Line>, detail: &RequestDetail, theme: &Theme, width: usize) {
    let bg = theme.background;
    let header_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(theme.dim).bg(bg);
    let text_style = Style::default().fg(theme.text).bg(bg);

    let number = detail.request_number.as_deref().unwrap_or("");
    let title = if number.is_empty() {
        format!(" {}", detail.title)
    } else {
        format!(" {}  {}", number, detail.title)
    };
    lines.push(Line::from(Span::styled(title, header_style)));

    let mut field = |label: &str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<11}", label), label_style),
                Span::styled(value, text_style),
            ]));
        }
    };
    field("Type", detail.approval_type.clone());
    let requester = match (&detail.requester_name, &detail.requester_role) {
        (Some(name), Some(role)) => Some(format!("{} ({})", name, role)),
        (Some(name), None) => Some(name.clone()),
        (None, Some(role)) => Some(role.clone()),
        (None, None) => None,
    };
    field("Requester", requester);
    field("Submitted", Some(short_timestamp(&detail.created_at)));
    field("Status", detail.current_status.clone());

    if let Some(description) = detail.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::from(""));
        for line in wrap_words(description, width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(format!(" {}", line), text_style)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Approval steps", header_style)));
    if detail.approval_flows.is_empty() {
        lines.push(Line::from(Span::styled(" (none)", label_style)));
    }
    for (i, flow) in detail.approval_flows.iter().enumerate() {
        let who = match (&flow.position_title, &flow.approver_name) {
            (Some(position), Some(name)) => format!("{} \u{00B7} {}", position, name),
            (Some(position), None) => position.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => "Unassigned".to_string(),
        };
        let mut spans = vec![
            Span::styled(format!(" {}. ", i + 1), label_style),
            Span::styled(who, text_style),
            Span::styled("  ", text_style),
            Span::styled(
                flow.status.clone(),
                Style::default().fg(theme.status_color(&flow.status)).bg(bg),
            ),
        ];
        if let Some(at) = &flow.approved_at {
            spans.push(Span::styled(format!("  {}", short_timestamp(at)), label_style));
        }
        lines.push(Line::from(spans));
        if let Some(remark) = &flow.remark {
            for line in wrap_words(remark, width.saturating_sub(8)) {
                lines.push(Line::from(Span::styled(
                    format!("    \u{201C}{}\u{201D}", line),
                    label_style,
                )));
            }
        }
    }

    if !detail.attachments.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Attachments", header_style)));
        for attachment in &detail.attachments {
            lines.push(Line::from(vec![
                Span::styled(format!(" #{:<4} ", attachment.id), label_style),
                Span::styled(attachment.file_name.clone(), text_style),
            ]));
        }
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::inbox::QrState;
use crate::tui::app::App;
use crate::util::unicode::{tail_to_width, wrap_words};

use super::helpers::centered_rect_fixed;

/// QR modal for the selected step
pub fn render_qr_popup(frame: &mut Frame, app: &App, area: Rect) {
    let (Some(flow_id), Some(state)) = (app.screen.qr().flow_id(), app.screen.qr().state()) else {
        return;
    };

    let theme = &app.theme;
    let bg = theme.background;
    let popup_w: u16 = 60.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let header_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" QR code \u{00B7} step {}", flow_id),
        header_style,
    )));
    lines.push(Line::from(""));

    let hint = match state {
        QrState::Loading => {
            lines.push(Line::from(Span::styled(" Loading QR code\u{2026}", dim_style)));
            " Esc close"
        }
        QrState::Failed(message) => {
            for line in wrap_words(message, inner_w.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!(" {}", line),
                    Style::default().fg(theme.red).bg(bg),
                )));
            }
            " r retry  Esc close"
        }
        QrState::Ready(artifact) => {
            lines.push(Line::from(Span::styled(
                format!(
                    " PNG {}\u{00D7}{}, {} bytes",
                    artifact.width,
                    artifact.height,
                    artifact.png.len()
                ),
                text_style,
            )));
            match &app.qr_path {
                Some(path) => {
                    lines.push(Line::from(Span::styled(" Saved to", dim_style)));
                    let shown =
                        tail_to_width(&path.display().to_string(), inner_w.saturating_sub(2));
                    lines.push(Line::from(Span::styled(
                        format!(" {}", shown),
                        Style::default().fg(theme.text_bright).bg(bg),
                    )));
                }
                None => {
                    lines.push(Line::from(Span::styled(" Not saved to disk", dim_style)));
                }
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " Scan it with the approver app to decide on this step.",
                dim_style,
            )));
            " Esc close"
        }
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, dim_style)));

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbox::ApiEvent;
    use crate::inbox::qr::fake_png;
    use crate::tui::render::test_helpers::*;
    use std::time::Instant;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_qr_popup(frame, app, area);
        })
    }

    #[test]
    fn loading_state() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        app.screen.open_qr(10);
        let output = render(&app);
        assert!(output.contains("QR code \u{00B7} step 10"));
        assert!(output.contains("Loading QR code\u{2026}"));
    }

    #[test]
    fn ready_shows_metadata_and_saved_path() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        app.screen.open_qr(10);
        app.screen.apply(ApiEvent::QrFetched {
            flow_id: 10,
            result: Ok(fake_png(200, 200)),
        });
        app.tick(Instant::now());
        let output = render(&app);
        assert!(output.contains("PNG 200\u{00D7}200, 29 bytes"));
        assert!(output.contains("qr-10.png"));
    }

    #[test]
    fn failure_is_explicit() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        app.screen.open_qr(10);
        app.screen.apply(ApiEvent::QrFetched {
            flow_id: 10,
            result: Err(crate::api::ApiError::Status {
                status: 404,
                status_text: "Not Found".into(),
                body: String::new(),
            }),
        });
        let output = render(&app);
        assert!(output.contains("QR code failed to load: 404 Not Found"));
        assert!(output.contains("r retry"));
    }
}

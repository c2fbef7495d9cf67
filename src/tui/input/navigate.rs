use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Decision;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Movement
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            let len = app.visible_items().len();
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.cursor = app.visible_items().len().saturating_sub(1);
        }

        // Item actions
        (KeyModifiers::NONE, KeyCode::Char('a')) => begin_decision(app, Decision::Approved),
        (KeyModifiers::NONE, KeyCode::Char('x')) => begin_decision(app, Decision::Rejected),
        // A note is an approval with a comment
        (KeyModifiers::NONE, KeyCode::Char('n')) => begin_decision(app, Decision::Approved),
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            if let Some(flow_id) = app.selected_item().map(|i| i.flow_id) {
                let effects = app.screen.open_qr(flow_id);
                app.queue(effects);
            }
        }
        (_, KeyCode::Enter) => {
            if let Some(id) = app.selected_item().map(|i| i.approval_request_id) {
                let effects = app.screen.open_detail(id);
                app.queue(effects);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('r')) => {
            let effects = app.screen.refresh();
            app.queue(effects);
        }

        // Search
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.mode = Mode::Search;
            app.search_input.clear();
        }
        (_, KeyCode::Esc) => {
            if app.last_search.take().is_some() {
                app.clamp_cursor();
            }
        }

        // Help overlay
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        _ => {}
    }
}

fn begin_decision(app: &mut App, decision: Decision) {
    if let Some(id) = app.selected_item().map(|i| i.approval_request_id) {
        app.screen.begin_decision(id, decision);
    }
}

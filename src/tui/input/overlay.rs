use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_help(app: &mut App, _key: KeyEvent) {
    app.show_help = false;
}

pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h')) {
        app.screen.close_detail();
    }
}

pub(super) fn handle_qr(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen.close_qr(),
        // Retry after a failure
        KeyCode::Char('r') => {
            if let Some(flow_id) = app.screen.qr().flow_id() {
                let effects = app.screen.open_qr(flow_id);
                app.queue(effects);
            }
        }
        _ => {}
    }
}

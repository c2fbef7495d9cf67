use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Decision;
use crate::tui::app::App;

use super::*;

/// Keys while the approve/reject dialog is up. Everything printable goes
/// into the remark.
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    // Submitting: the dialog is inert until the backend answers
    if app.screen.confirm().is_submitting() {
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.screen.cancel_decision();
        }
        KeyCode::Enter => {
            let effects = app.screen.submit_decision();
            app.queue(effects);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.screen.confirm().pending().map(|p| p.decision) {
                Some(Decision::Approved) => Decision::Rejected,
                _ => Decision::Approved,
            };
            app.screen.confirm_mut().set_decision(next);
        }
        KeyCode::Backspace => {
            app.screen.confirm_mut().backspace();
        }
        _ => {
            if let Some(c) = is_text_input(&key) {
                app.screen.confirm_mut().push_char(c);
            }
        }
    }
}

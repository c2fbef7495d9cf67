mod common;
mod confirm;
mod navigate;
mod overlay;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use overlay::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event. Modals take precedence over the list: the
/// confirmation dialog, then the detail pane, then the QR modal.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Quit: Ctrl+Q, from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('q')) {
        app.should_quit = true;
        return;
    }

    // Any key dismisses what is on the status row
    app.screen.clear_notifications();

    if app.show_help {
        handle_help(app, key);
        return;
    }

    let key = normalize_key(key);
    if app.screen.confirm().is_active() {
        handle_confirm(app, key);
    } else if app.screen.detail().is_some() {
        handle_detail(app, key);
    } else if app.screen.qr().is_open() {
        handle_qr(app, key);
    } else {
        match app.mode {
            Mode::Navigate => handle_navigate(app, key),
            Mode::Search => handle_search(app, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbox::{ConfirmState, Effect, Phase};
    use crate::model::Decision;
    use crate::tui::render::test_helpers::{app_with_items, item};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn approve_with_remark_queues_submit() {
        let mut app = app_with_items(vec![item(1, "Leave"), item(2, "Laptop")]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        assert!(app.screen.confirm().is_open());
        type_str(&mut app, "fine by me");
        press(&mut app, KeyCode::Enter);

        match app.outbox.as_slice() {
            [Effect::SubmitDecision {
                approval_request_id,
                payload,
            }] => {
                assert_eq!(*approval_request_id, 2);
                assert_eq!(payload.remark, "fine by me");
                assert_eq!(payload.status, Decision::Approved);
            }
            other => panic!("unexpected outbox {:?}", other),
        }
        assert_eq!(app.screen.phase(), Phase::ActionPending);
    }

    #[test]
    fn keys_in_remark_are_text_not_commands() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        press(&mut app, KeyCode::Char('x'));
        type_str(&mut app, "jqa/");
        assert_eq!(app.screen.confirm().pending().unwrap().remark, "jqa/");
        assert!(!app.screen.qr().is_open());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn empty_remark_enter_stays_open() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(app.outbox.is_empty());
        assert!(app.screen.confirm().validation_error().is_some());
    }

    #[test]
    fn esc_cancels_and_tab_switches() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(
            app.screen.confirm().pending().unwrap().decision,
            Decision::Approved
        );
        press(&mut app, KeyCode::Tab);
        assert_eq!(
            app.screen.confirm().pending().unwrap().decision,
            Decision::Rejected
        );
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen.confirm().state(), &ConfirmState::Closed);
        assert!(app.outbox.is_empty());
    }

    #[test]
    fn qr_and_detail_queue_fetches() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.outbox, vec![Effect::FetchQr { flow_id: 10 }]);
        press(&mut app, KeyCode::Esc);
        assert!(!app.screen.qr().is_open());

        app.outbox.clear();
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.outbox,
            vec![Effect::FetchDetail {
                approval_request_id: 1
            }]
        );
        press(&mut app, KeyCode::Esc);
        assert!(app.screen.detail().is_none());
    }

    #[test]
    fn search_filters_and_esc_restores() {
        let mut app = app_with_items(vec![item(1, "Leave"), item(2, "Laptop")]);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        type_str(&mut app, "lap");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.last_search.as_deref(), Some("lap"));
        assert_eq!(app.visible_items().len(), 1);
        // Actions target the filtered row
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(
            app.screen.confirm().pending().unwrap().approval_request_id(),
            2
        );
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert!(app.last_search.is_none());
        assert_eq!(app.visible_items().len(), 2);
    }

    #[test]
    fn refresh_and_quit() {
        let mut app = app_with_items(vec![item(1, "Leave")]);
        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(app.outbox.as_slice(), [Effect::FetchInbox(_)]));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn help_toggles() {
        let mut app = app_with_items(vec![]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.show_help);
        assert!(!app.screen.confirm().is_active());
    }
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel search, keep the previous filter
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
        }

        // Apply filter
        KeyCode::Enter => {
            app.last_search = if app.search_input.is_empty() {
                None
            } else {
                Some(std::mem::take(&mut app.search_input))
            };
            app.mode = Mode::Navigate;
            app.cursor = 0;
            app.scroll = 0;
        }

        KeyCode::Backspace => {
            app.search_input.pop();
        }

        _ => {
            if let Some(c) = is_text_input(&key) {
                app.search_input.push(c);
            }
        }
    }
}

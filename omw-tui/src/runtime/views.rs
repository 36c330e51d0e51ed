use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit()
        }
        // Esc clears a half-typed line first, then quits
        KeyCode::Esc => {
            if app.input.value.is_empty() {
                app.quit();
            } else {
                app.input.clear();
            }
        }
        KeyCode::Enter => {
            let line = app.take_input();
            enqueue_action(action_tx, Action::Submit { line });
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert(c);
        }
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.home(),
        KeyCode::End => app.input.end(),
        KeyCode::F(1) => app.toggle_help_panel(),
        KeyCode::F(2) => app.toggle_report_panel(),
        KeyCode::Down | KeyCode::PageDown => app.scroll_report_down(),
        KeyCode::Up | KeyCode::PageUp => app.scroll_report_up(),
        _ => {}
    }
}

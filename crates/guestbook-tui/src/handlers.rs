//! Keyboard event handling.

use crate::app::{App, AppState, Field, InputMode, Modal};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.state = AppState::Quit;
        return true;
    }

    // Dialogs block everything underneath
    if let Some(modal) = app.active_modal() {
        if matches!(modal, Modal::Alert(_)) {
            handle_alert_key(app, key);
        } else {
            handle_confirm_key(app, key);
        }
        return false;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

fn handle_alert_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_alert();
    }
}

fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_delete(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_delete(false),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quit;
            true
        }
        KeyCode::Char('i') | KeyCode::Tab => {
            app.start_editing();
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.request_delete();
            false
        }
        KeyCode::Char('r') => {
            app.refresh();
            false
        }
        KeyCode::Char('h') => {
            app.check_health();
            false
        }
        _ => false,
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Tab => app.next_field(),
        // Alt+Enter inserts a line break in the message
        KeyCode::Enter
            if app.field == Field::Content && key.modifiers.contains(KeyModifiers::ALT) =>
        {
            app.push_char('\n')
        }
        KeyCode::Enter if app.field == Field::Author => app.next_field(),
        KeyCode::Enter => app.submit(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use guestbook_core::{Entry, EntryId, Request, Response, Schema};

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn board_with_entry() -> App {
        let mut app = App::new(Schema::Board, String::new());
        app.handle_response(Response::Entries(Ok(vec![Entry {
            id: EntryId::Number(5),
            author: None,
            content: "hi".into(),
            created_at: "2024-05-01T10:00:00".into(),
        }])));
        app
    }

    #[test]
    fn typing_and_enter_submits() {
        let mut app = App::new(Schema::Board, String::new());
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Enter);

        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0], Request::Create(p) if p.content == "ok"));
    }

    #[test]
    fn enter_on_author_moves_to_content() {
        let mut app = App::new(Schema::Guestbook, String::new());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.field, Field::Content);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut app = board_with_entry();
        app.alert("boom");

        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Running);

        press(&mut app, KeyCode::Enter);
        assert!(app.active_modal().is_none());
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn delete_key_asks_then_escape_cancels() {
        let mut app = board_with_entry();
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(
            app.active_modal(),
            Some(Modal::ConfirmDelete { .. })
        ));

        press(&mut app, KeyCode::Esc);
        assert!(app.active_modal().is_none());
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn delete_key_then_yes_sends_delete() {
        let mut app = board_with_entry();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.take_requests(), vec![Request::Delete(EntryId::Number(5))]);
    }
}

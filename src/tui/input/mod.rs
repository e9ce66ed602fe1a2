use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::autocomplete::Key;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::app::App;

/// Handle a key event on the task form.
///
/// The dropdown sees the key first. Only keys it leaves alone get their
/// normal meaning: Enter submits, Esc cancels, the rest edit the text.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.cancel();
        return;
    }

    let outcome = app.form.handle_key(form_key(key.code));
    if outcome.suppresses_default() {
        app.message = None;
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        code => {
            app.message = None;
            edit_text(app, code, key.modifiers);
        }
    }
}

fn form_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

fn edit_text(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let form = &mut app.form;
    match code {
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let mut buf = [0u8; 4];
            form.insert_str(c.encode_utf8(&mut buf));
        }
        KeyCode::Backspace => form.delete_back(),
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(form.input(), form.caret()) {
                form.set_caret(prev);
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(form.input(), form.caret()) {
                form.set_caret(next);
            }
        }
        KeyCode::Home => form.set_caret(0),
        KeyCode::End => {
            let end = form.input().len();
            form.set_caret(end);
        }
        _ => {}
    }
}

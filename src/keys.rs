use crate::state::navigator::Message;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for.
#[derive(Debug)]
pub enum KeyAction {
    Navigate(Message),
    ToggleLogs,
}

/// Map a key press to an action. View-specific keys (refresh, upcoming) map
/// unconditionally; the navigator ignores them where they do not apply.
pub fn key_action(key_event: KeyEvent) -> Option<KeyAction> {
    let message = match (key_event.code, key_event.modifiers) {
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => Message::Quit,

        (Char('"'), _) => return Some(KeyAction::ToggleLogs),

        (Char('k') | KeyCode::Up, _) => Message::Up,
        (Char('j') | KeyCode::Down, _) => Message::Down,
        (KeyCode::Enter | KeyCode::Right | Char('l'), _) => Message::Confirm,
        (KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | Char('h'), _) => Message::Back,

        (Char('r'), _) => Message::Refresh,
        (Char('u'), _) => Message::ToggleUpcoming,

        _ => return None,
    };
    Some(KeyAction::Navigate(message))
}

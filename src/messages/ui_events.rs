//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Route;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Login surface
    PasscodeChar(char),
    PasscodeBackspace,
    OpenLogin,
    CloseLogin,

    // Session
    Logout,

    // Activity widget
    RefreshActivity,
    ClearActivity,

    // Layout
    ToggleSidebar,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, route: Route, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match route {
        Route::Login => match key.code {
            KeyCode::Esc => Some(UiEvent::CloseLogin),
            KeyCode::Backspace => Some(UiEvent::PasscodeBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(UiEvent::PasscodeChar(c)),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        },
        Route::Home => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('l') => Some(UiEvent::OpenLogin),
            KeyCode::Char('x') => Some(UiEvent::Logout),
            KeyCode::Char('r') => Some(UiEvent::RefreshActivity),
            KeyCode::Char('c') => Some(UiEvent::ClearActivity),
            KeyCode::Char('b') | KeyCode::Tab => Some(UiEvent::ToggleSidebar),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_login_accepts_only_digits() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('7')), Route::Login, false),
            Some(UiEvent::PasscodeChar('7'))
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Char('a')), Route::Login, false), None);
        assert_eq!(
            key_to_ui_event(press(KeyCode::Esc), Route::Login, false),
            Some(UiEvent::CloseLogin)
        );
    }

    #[test]
    fn test_home_bindings() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('x')), Route::Home, false),
            Some(UiEvent::Logout)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('b')), Route::Home, false),
            Some(UiEvent::ToggleSidebar)
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Char('7')), Route::Home, false), None);
    }

    #[test]
    fn test_help_swallows_keys_but_not_ctrl_c() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('x')), Route::Home, true),
            Some(UiEvent::CloseHelp)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, Route::Login, true), Some(UiEvent::Quit));
    }
}

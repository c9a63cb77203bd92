use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    NextSection,
    PrevSection,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    Remount,
    ToggleVariant,
    Help,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) | (KeyCode::Char(' '), _) => {
            Action::PageDown
        }
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::PageUp,

        // Section jumps
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Tab, _) => Action::NextSection,
        (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::BackTab, _) => Action::PrevSection,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,

        // Page control
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Remount,
        (KeyCode::Char('v'), KeyModifiers::NONE) => Action::ToggleVariant,
        (KeyCode::Char('?'), _) => Action::Help,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Variant;
    use glide_core::AppConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(AppConfig::default(), Variant::SmartHome, 80, 24)
    }

    #[test]
    fn test_basic_bindings() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Up), &app), Action::ScrollUp);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &app),
            Action::HalfPageDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('v')), &app), Action::ToggleVariant);
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::None);
    }

    #[test]
    fn test_gg_needs_two_presses() {
        let mut app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_any_key_leaves_help() {
        let mut app = app();
        app.mode = Mode::Help;
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::ExitMode);
    }
}

//! Keyboard event to command mapping

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::commands::{Command, Direction};

/// Maps terminal key events to commands
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key event; unknown keys produce no command
    pub fn handle_key(&self, key: KeyEvent) -> Option<Command> {
        // Ignore key release events (crossterm reports both on some terminals)
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Left => Some(Command::StepEffect(Direction::Prev)),
            KeyCode::Right => Some(Command::StepEffect(Direction::Next)),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::ToggleOverlay),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_step_the_effect() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(press(KeyCode::Left)),
            Some(Command::StepEffect(Direction::Prev))
        );
        assert_eq!(
            handler.handle_key(press(KeyCode::Right)),
            Some(Command::StepEffect(Direction::Next))
        );
    }

    #[test]
    fn overlay_toggle_is_case_insensitive() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(press(KeyCode::Char('l'))),
            Some(Command::ToggleOverlay)
        );
        assert_eq!(
            handler.handle_key(press(KeyCode::Char('L'))),
            Some(Command::ToggleOverlay)
        );
    }

    #[test]
    fn quit_bindings() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(handler.handle_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(press(KeyCode::Char('x'))), None);
        assert_eq!(handler.handle_key(press(KeyCode::Up)), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let handler = InputHandler::new();
        let mut key = press(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key(key), None);
    }
}

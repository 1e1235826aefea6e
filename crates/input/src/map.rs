//! Key mapping from terminal events to control symbols.

use crate::types::{Symbol, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP, RECORD, STOP};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to one of `controls`.
///
/// Arrows (and hjkl/wasd) map to the arrow controls, Enter/space to record,
/// Esc/Backspace to stop, and digits `1..=9` to the n-th control. A mapped
/// symbol the game does not accept yields `None`.
pub fn key_to_symbol(key: KeyEvent, controls: &[Symbol]) -> Option<Symbol> {
    let named = match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => ARROW_LEFT,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => ARROW_RIGHT,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => ARROW_UP,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => ARROW_DOWN,
        KeyCode::Enter | KeyCode::Char(' ') => RECORD,
        KeyCode::Esc | KeyCode::Backspace => STOP,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            return controls.get(index).cloned();
        }
        _ => return None,
    };

    controls.iter().find(|s| *s == named).cloned()
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key should start a new session.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::arrow_controls;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn controls() -> Vec<Symbol> {
        let mut c = arrow_controls();
        c.push(Symbol::from(STOP));
        c
    }

    #[test]
    fn test_arrow_keys() {
        let c = controls();
        assert_eq!(
            key_to_symbol(KeyEvent::from(KeyCode::Left), &c),
            Some(Symbol::from(ARROW_LEFT))
        );
        assert_eq!(
            key_to_symbol(KeyEvent::from(KeyCode::Char('k')), &c),
            Some(Symbol::from(ARROW_UP))
        );
        assert_eq!(
            key_to_symbol(KeyEvent::from(KeyCode::Char('s')), &c),
            Some(Symbol::from(ARROW_DOWN))
        );
    }

    #[test]
    fn test_symbols_outside_controls_are_dropped() {
        let c = controls();
        assert_eq!(key_to_symbol(KeyEvent::from(KeyCode::Enter), &c), None);
        assert_eq!(
            key_to_symbol(KeyEvent::from(KeyCode::Esc), &c),
            Some(Symbol::from(STOP))
        );
        assert_eq!(key_to_symbol(KeyEvent::from(KeyCode::Char('x')), &c), None);
    }

    #[test]
    fn test_digit_keys_index_controls() {
        let c = controls();
        assert_eq!(
            key_to_symbol(KeyEvent::from(KeyCode::Char('1')), &c),
            Some(Symbol::from(ARROW_LEFT))
        );
        assert_eq!(
            key_to_symbol(KeyEvent::from(KeyCode::Char('5')), &c),
            Some(Symbol::from(STOP))
        );
        assert_eq!(key_to_symbol(KeyEvent::from(KeyCode::Char('9')), &c), None);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
    }
}

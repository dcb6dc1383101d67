//! Adapter to convert winit key events to our KeyEvent type

use winit::keyboard::{Key, NamedKey};

use crate::focus::FocusTarget;
use crate::normalize::KeyEvent;
use crate::types::KeyCode;

/// Convert winit key event data to our KeyEvent type
///
/// The focus target comes from the host, which knows which of its widgets
/// had keyboard focus. Returns None if the key cannot be mapped.
pub fn key_event_from_winit(
    logical_key: &Key,
    ctrl: bool,
    shift: bool,
    alt: bool,
    logo: bool, // logo = meta = cmd on macOS
    target: FocusTarget,
) -> Option<KeyEvent> {
    let key = match logical_key {
        // Named keys
        Key::Named(named) => match named {
            NamedKey::Enter => Some(KeyCode::Enter),
            NamedKey::Escape => Some(KeyCode::Escape),
            NamedKey::Tab => Some(KeyCode::Tab),
            NamedKey::Backspace => Some(KeyCode::Backspace),
            NamedKey::Delete => Some(KeyCode::Delete),
            NamedKey::Space => Some(KeyCode::Space),

            // Arrows
            NamedKey::ArrowUp => Some(KeyCode::Up),
            NamedKey::ArrowDown => Some(KeyCode::Down),
            NamedKey::ArrowLeft => Some(KeyCode::Left),
            NamedKey::ArrowRight => Some(KeyCode::Right),

            // Navigation
            NamedKey::Home => Some(KeyCode::Home),
            NamedKey::End => Some(KeyCode::End),
            NamedKey::PageUp => Some(KeyCode::PageUp),
            NamedKey::PageDown => Some(KeyCode::PageDown),

            // Function keys
            NamedKey::F1 => Some(KeyCode::F(1)),
            NamedKey::F2 => Some(KeyCode::F(2)),
            NamedKey::F3 => Some(KeyCode::F(3)),
            NamedKey::F4 => Some(KeyCode::F(4)),
            NamedKey::F5 => Some(KeyCode::F(5)),
            NamedKey::F6 => Some(KeyCode::F(6)),
            NamedKey::F7 => Some(KeyCode::F(7)),
            NamedKey::F8 => Some(KeyCode::F(8)),
            NamedKey::F9 => Some(KeyCode::F(9)),
            NamedKey::F10 => Some(KeyCode::F(10)),
            NamedKey::F11 => Some(KeyCode::F(11)),
            NamedKey::F12 => Some(KeyCode::F(12)),

            _ => None,
        },

        // Character keys - normalize to lowercase
        Key::Character(s) => {
            let c = s.chars().next()?;
            Some(KeyCode::char(c))
        }

        _ => None,
    }?;

    Some(KeyEvent {
        key,
        ctrl,
        shift,
        alt,
        meta: logo,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_key() {
        let event = key_event_from_winit(
            &Key::Character("s".into()),
            true,
            false,
            false,
            false,
            FocusTarget::None,
        );

        let event = event.expect("should map");
        assert_eq!(event.key, KeyCode::Char('s'));
        assert!(event.ctrl);
        assert!(!event.shift);
    }

    #[test]
    fn test_uppercase_normalized() {
        let event = key_event_from_winit(
            &Key::Character("S".into()),
            false,
            true, // shift
            false,
            false,
            FocusTarget::None,
        );

        let event = event.expect("should map");
        // Character should be lowercase even with shift
        assert_eq!(event.key, KeyCode::Char('s'));
        assert!(event.shift);
    }

    #[test]
    fn test_named_key() {
        let event = key_event_from_winit(
            &Key::Named(NamedKey::Escape),
            false,
            false,
            false,
            false,
            FocusTarget::TextInput,
        );

        let event = event.expect("should map");
        assert_eq!(event.key, KeyCode::Escape);
        assert_eq!(event.target, FocusTarget::TextInput);
    }

    #[test]
    fn test_arrow_with_modifiers() {
        let event = key_event_from_winit(
            &Key::Named(NamedKey::ArrowLeft),
            false,
            true, // shift
            true, // alt
            false,
            FocusTarget::None,
        );

        let event = event.expect("should map");
        assert_eq!(event.key, KeyCode::Left);
        assert!(event.shift);
        assert!(event.alt);
        assert!(!event.ctrl);
    }

    #[test]
    fn test_unmapped_key_returns_none() {
        let event = key_event_from_winit(
            &Key::Named(NamedKey::MediaPlayPause),
            false,
            false,
            false,
            false,
            FocusTarget::None,
        );
        assert!(event.is_none());
    }
}

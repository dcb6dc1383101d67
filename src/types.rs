//! Core key model: Keystroke, Modifiers, KeyCode

use std::fmt;

use crate::normalize::Platform;

/// Modifier flags as a bitfield for efficient storage and comparison
///
/// `CMD` is the platform-resolved primary modifier: the Command key on
/// macOS, Control everywhere else. The resolution happens in
/// [`crate::normalize`]; by the time a `Modifiers` value exists the
/// platform question is already settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CMD: Modifiers = Modifiers(0b001);
    pub const SHIFT: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(cmd: bool, shift: bool, alt: bool) -> Self {
        let mut bits = 0u8;
        if cmd {
            bits |= 0b001;
        }
        if shift {
            bits |= 0b010;
        }
        if alt {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    /// Check if the primary (ctrl-or-cmd) modifier is held
    #[inline]
    pub const fn cmd(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.cmd() {
            parts.push("Mod");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key that shortcuts can bind to
///
/// Character keys are normalized to ASCII lowercase at construction so
/// matching is case-insensitive for letters. Named keys match exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to lowercase)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Function keys
    F(u8),
}

impl KeyCode {
    /// Create a character key, normalized to lowercase
    pub fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_lowercase())
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A single normalized key press: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    /// Create a new keystroke
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create a keystroke with a character key
    pub fn char(c: char) -> Self {
        Self {
            key: KeyCode::char(c),
            mods: Modifiers::NONE,
        }
    }

    /// Create a keystroke with a character and modifiers
    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self {
            key: KeyCode::char(c),
            mods,
        }
    }

    /// Display the keystroke using platform-specific symbols
    pub fn display_string(&self, platform: Platform) -> String {
        let mut parts = Vec::new();

        match platform {
            Platform::MacOs => {
                // macOS uses symbols: ⌥ ⇧ ⌘
                if self.mods.alt() {
                    parts.push("⌥");
                }
                if self.mods.shift() {
                    parts.push("⇧");
                }
                if self.mods.cmd() {
                    parts.push("⌘");
                }
            }
            Platform::Other => {
                if self.mods.cmd() {
                    parts.push("Ctrl+");
                }
                if self.mods.alt() {
                    parts.push("Alt+");
                }
                if self.mods.shift() {
                    parts.push("Shift+");
                }
            }
        }

        format!("{}{}", parts.join(""), self.key)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.cmd());
        assert!(!mods.shift());
        assert!(!mods.alt());
    }

    #[test]
    fn test_modifiers_individual() {
        assert!(Modifiers::CMD.cmd());
        assert!(!Modifiers::CMD.shift());

        assert!(Modifiers::SHIFT.shift());
        assert!(!Modifiers::SHIFT.cmd());

        assert!(Modifiers::ALT.alt());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CMD | Modifiers::SHIFT;
        assert!(mods.cmd());
        assert!(mods.shift());
        assert!(!mods.alt());
    }

    #[test]
    fn test_modifiers_new() {
        let mods = Modifiers::new(true, false, true);
        assert!(mods.cmd());
        assert!(!mods.shift());
        assert!(mods.alt());
    }

    #[test]
    fn test_keystroke_char_lowercase() {
        let stroke1 = Keystroke::char('A');
        let stroke2 = Keystroke::char('a');
        assert_eq!(stroke1, stroke2);
    }

    #[test]
    fn test_keystroke_display() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CMD);
        let display = stroke.display_string(Platform::Other);
        assert!(display.contains("Ctrl"));
        assert!(display.contains('S'));

        let display = stroke.display_string(Platform::MacOs);
        assert!(display.contains('⌘'));
    }

    #[test]
    fn test_named_key_display() {
        assert_eq!(format!("{}", KeyCode::Escape), "Escape");
        assert_eq!(format!("{}", KeyCode::F(5)), "F5");
    }
}

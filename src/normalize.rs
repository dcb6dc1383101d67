//! Platform key normalization
//!
//! Collapses a raw key-down event into a comparable [`Keystroke`]. The only
//! decision made here is which physical modifier backs the primary `CMD`
//! flag: Command (meta) on Apple platforms, Control everywhere else. Key
//! case handling lives in [`KeyCode::char`]; nothing else is normalized.

use crate::focus::FocusTarget;
use crate::types::{KeyCode, Keystroke, Modifiers};

/// Modifier semantics of the host platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    #[default]
    Other,
}

impl Platform {
    /// The platform this binary was compiled for
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

/// A raw key-down event as delivered by the host environment
///
/// Carries the pressed key, the independent modifier-key states, and the
/// focus target used by the input guard. Hosts construct these from their
/// native event type (see [`crate::winit_adapter`] for one adapter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub target: FocusTarget,
}

impl KeyEvent {
    /// An event for the given key with no modifiers, targeting no element
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            target: FocusTarget::None,
        }
    }

    /// An event for a character key (normalized to lowercase)
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::char(c))
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Set the focus target the event was delivered to
    pub fn on(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }
}

/// Normalize a raw event into a keystroke under the given platform
///
/// `CMD` reads the meta state on macOS and the ctrl state elsewhere; the
/// off-platform key is ignored entirely — it neither sets nor blocks a
/// match.
pub fn normalize(event: &KeyEvent, platform: Platform) -> Keystroke {
    let cmd = match platform {
        Platform::MacOs => event.meta,
        Platform::Other => event.ctrl,
    };
    Keystroke::new(event.key, Modifiers::new(cmd, event.shift, event.alt))
}

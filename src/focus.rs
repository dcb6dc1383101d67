//! Input-focus guard
//!
//! Classifies the element a key event was delivered to, so shortcuts
//! without `allow_in_input` stay quiet while the user is typing. The host
//! UI layer reports one of a closed set of roles rather than raw element
//! tags, which keeps the check portable across environments.

use serde::Deserialize;

/// The kind of element that had focus when a key event fired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    /// No element focused (document/body level)
    #[default]
    None,
    /// Single-line text input
    TextInput,
    /// Multi-line text area
    TextArea,
    /// Select/dropdown element
    Select,
    /// Element with the content-editable capability
    ContentEditable,
    /// Any other focusable element (buttons, links, ...)
    Other,
}

impl FocusTarget {
    /// Whether keystrokes sent to this target are text editing
    pub const fn is_editable(self) -> bool {
        matches!(
            self,
            FocusTarget::TextInput
                | FocusTarget::TextArea
                | FocusTarget::Select
                | FocusTarget::ContentEditable
        )
    }
}

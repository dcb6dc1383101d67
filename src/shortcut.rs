//! Shortcut definitions: what a component binds and how it fires

use std::fmt;

use serde::Deserialize;

use crate::types::{KeyCode, Modifiers};

/// Zero-argument side-effecting callback owned by the registering component
pub type Handler = Box<dyn FnMut() + 'static>;

/// What presses trigger a shortcut
///
/// A definition has exactly one trigger: a single key (plus modifiers) or
/// an ordered multi-key sequence. Sequences and single keys are matched
/// through disjoint code paths; sequence matching ignores modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    Key(KeyCode),
    Sequence(Vec<KeyCode>),
}

impl Trigger {
    pub fn is_sequence(&self) -> bool {
        matches!(self, Trigger::Sequence(_))
    }

    /// Stable textual form, used for generated ids and help dedup
    pub fn signature(&self) -> String {
        match self {
            Trigger::Key(key) => format!("{}", key).to_lowercase(),
            Trigger::Sequence(keys) => keys
                .iter()
                .map(|k| format!("{}", k).to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Grouping buckets for the help surface
///
/// Purely presentational; dispatch never looks at the category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Navigation,
    Actions,
    Candidates,
    Vacancies,
    Kanban,
    #[default]
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Navigation => write!(f, "Navigation"),
            Category::Actions => write!(f, "Actions"),
            Category::Candidates => write!(f, "Candidates"),
            Category::Vacancies => write!(f, "Vacancies"),
            Category::Kanban => write!(f, "Kanban"),
            Category::General => write!(f, "General"),
        }
    }
}

/// One bindable action
///
/// Built with [`ShortcutDefinition::key`] or [`ShortcutDefinition::sequence`]
/// and refined through the builder methods:
///
/// ```
/// use keyroute::{Category, KeyCode, Modifiers, ShortcutDefinition};
///
/// let def = ShortcutDefinition::key(KeyCode::char('n'), || {})
///     .with_mods(Modifiers::CMD)
///     .in_category(Category::Candidates)
///     .describe("New candidate");
/// ```
pub struct ShortcutDefinition {
    /// Stable identifier, unique within a context (generated if not set)
    pub id: String,
    pub trigger: Trigger,
    /// Required modifier set; the event's modifiers must match exactly,
    /// so a plain binding rejects modified presses of the same key
    pub mods: Modifiers,
    /// Fire even while an editable element has focus (Escape always does)
    pub allow_in_input: bool,
    /// Ask the host to suppress its default handling of the event
    pub prevent_default: bool,
    pub category: Category,
    /// Active in every context and boosted to the fixed global priority
    pub global: bool,
    /// Shown by the help surface
    pub description: Option<String>,
    pub handler: Handler,
}

impl ShortcutDefinition {
    /// A single-key shortcut with no modifiers
    pub fn key(key: KeyCode, handler: impl FnMut() + 'static) -> Self {
        let trigger = Trigger::Key(key);
        Self {
            id: trigger.signature(),
            trigger,
            mods: Modifiers::NONE,
            allow_in_input: false,
            prevent_default: true,
            category: Category::General,
            global: false,
            description: None,
            handler: Box::new(handler),
        }
    }

    /// A multi-key sequence shortcut (e.g. `g` then `c`)
    pub fn sequence(keys: Vec<KeyCode>, handler: impl FnMut() + 'static) -> Self {
        let trigger = Trigger::Sequence(keys);
        Self {
            id: trigger.signature(),
            trigger,
            mods: Modifiers::NONE,
            allow_in_input: false,
            prevent_default: true,
            category: Category::General,
            global: false,
            description: None,
            handler: Box::new(handler),
        }
    }

    /// Override the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Require these modifiers (exact-match at dispatch)
    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    pub fn in_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Fire even while an editable element has focus
    pub fn allow_in_input(mut self) -> Self {
        self.allow_in_input = true;
        self
    }

    /// Leave the host's default handling of the event alone
    pub fn passive(mut self) -> Self {
        self.prevent_default = false;
        self
    }

    /// Mark as visible and active across all contexts
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Debug for ShortcutDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDefinition")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("mods", &self.mods)
            .field("allow_in_input", &self.allow_in_input)
            .field("prevent_default", &self.prevent_default)
            .field("category", &self.category)
            .field("global", &self.global)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_definition_defaults() {
        let def = ShortcutDefinition::key(KeyCode::char('n'), || {});
        assert_eq!(def.id, "n");
        assert!(!def.allow_in_input);
        assert!(def.prevent_default);
        assert!(!def.global);
        assert_eq!(def.category, Category::General);
    }

    #[test]
    fn test_sequence_signature_id() {
        let def = ShortcutDefinition::sequence(vec![KeyCode::char('g'), KeyCode::char('c')], || {});
        assert_eq!(def.id, "g c");
        assert!(def.trigger.is_sequence());
    }

    #[test]
    fn test_builder_chain() {
        let def = ShortcutDefinition::key(KeyCode::char('k'), || {})
            .with_id("palette")
            .with_mods(Modifiers::CMD)
            .in_category(Category::Navigation)
            .allow_in_input()
            .passive()
            .global()
            .describe("Open command palette");

        assert_eq!(def.id, "palette");
        assert_eq!(def.mods, Modifiers::CMD);
        assert_eq!(def.category, Category::Navigation);
        assert!(def.allow_in_input);
        assert!(!def.prevent_default);
        assert!(def.global);
        assert_eq!(def.description.as_deref(), Some("Open command palette"));
    }

    #[test]
    fn test_trigger_signature_case() {
        let a = Trigger::Key(KeyCode::char('A'));
        let b = Trigger::Key(KeyCode::char('a'));
        assert_eq!(a.signature(), b.signature());
    }
}

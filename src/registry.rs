//! Shortcut registry: the mutable set of live registrations
//!
//! UI regions register shortcuts as they come up and remove them as they
//! tear down. The registry is a plain ordered collection; resolution order
//! (priority, context) is the dispatcher's concern, but registration order
//! is preserved here because it breaks priority ties.

use crate::shortcut::ShortcutDefinition;

/// Effective priority assigned to `global` definitions
pub const GLOBAL_PRIORITY: i32 = 100;

/// Context every registration without an explicit scope lands in
pub const GLOBAL_CONTEXT: &str = "global";

/// Opaque token identifying one registration
///
/// Returned by [`ShortcutRegistry::register`]; passing it to
/// [`ShortcutRegistry::unregister`] removes exactly that entry. Stale or
/// repeated tokens are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

/// A definition plus its registration scope
#[derive(Debug)]
pub struct RegisteredShortcut {
    pub definition: ShortcutDefinition,
    /// Context tag this registration is live in
    pub context: String,
    /// Tie-break rank among eligible matches; higher fires first
    pub priority: i32,
    id: RegistrationId,
}

impl RegisteredShortcut {
    pub fn registration_id(&self) -> RegistrationId {
        self.id
    }

    /// Priority used at dispatch: `global` definitions get the fixed boost
    pub fn effective_priority(&self) -> i32 {
        if self.definition.global {
            GLOBAL_PRIORITY
        } else {
            self.priority
        }
    }

    /// Whether this registration is live under the given active context
    pub fn visible_in(&self, active_context: &str) -> bool {
        self.definition.global || self.context == GLOBAL_CONTEXT || self.context == active_context
    }
}

/// Ordered collection of live registrations
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    entries: Vec<RegisteredShortcut>,
    next_id: u64,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a registration; cannot fail
    ///
    /// Duplicate ids within a context are tolerated and produce two
    /// independent entries; generating colliding ids is a caller error.
    pub fn register(
        &mut self,
        definition: ShortcutDefinition,
        context: impl Into<String>,
        priority: i32,
    ) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        let context = context.into();
        tracing::debug!(
            shortcut = %definition.id,
            context = %context,
            priority,
            "registering shortcut"
        );
        self.entries.push(RegisteredShortcut {
            definition,
            context,
            priority,
            id,
        });
        id
    }

    /// Remove the entry registered under this token
    ///
    /// A no-op when the token was already removed or never issued.
    pub fn unregister(&mut self, id: RegistrationId) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            tracing::debug!(?id, "unregistered shortcut");
        }
    }

    /// Bulk-remove every entry registered under the given context
    pub fn unregister_context(&mut self, context: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.context != context);
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(context, removed, "unregistered context");
        }
    }

    /// Current registrations, in registration order
    pub fn shortcuts(&self) -> &[RegisteredShortcut] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke the handler of the entry at `index`
    pub(crate) fn invoke(&mut self, index: usize) {
        (self.entries[index].definition.handler)();
    }
}

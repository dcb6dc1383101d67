//! Dispatcher: resolves each key event against the live registrations
//!
//! On every key-down the engine normalizes the event, runs the sequence
//! matcher, then the built-in help-overlay keys, then single-key matching
//! under the priority and context rules. At most one handler fires per
//! event across all of those paths.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::help::{self, HelpEntry};
use crate::normalize::{normalize, KeyEvent, Platform};
use crate::registry::{RegistrationId, ShortcutRegistry, GLOBAL_CONTEXT};
use crate::sequence::{match_tail, SeqMatch, SequenceBuffer};
use crate::shortcut::{Category, ShortcutDefinition, Trigger};
use crate::types::{KeyCode, Keystroke};

/// Result of dispatching one key event
///
/// `Fired` carries whether the host should suppress its default handling.
/// `AwaitMore` means the event was consumed by a possible chord in
/// progress; nothing fired and nothing else should handle the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// Exactly one handler was invoked
    Fired { prevent_default: bool },
    /// Keystroke may extend a sequence, await more input
    AwaitMore,
    /// No shortcut matched this keystroke
    NoMatch,
}

/// The shortcut engine: registry, sequence state, and active context
///
/// One engine lives at the application root for the lifetime of the key
/// listener. Construct a fresh one per test; there is no ambient global
/// state.
#[derive(Debug)]
pub struct ShortcutEngine {
    registry: ShortcutRegistry,
    buffer: SequenceBuffer,
    active_context: String,
    platform: Platform,
    help_visible: bool,
}

impl ShortcutEngine {
    /// An engine for the compile-time platform
    pub fn new() -> Self {
        Self::with_platform(Platform::current())
    }

    /// An engine with explicit modifier semantics
    pub fn with_platform(platform: Platform) -> Self {
        Self {
            registry: ShortcutRegistry::new(),
            buffer: SequenceBuffer::default(),
            active_context: GLOBAL_CONTEXT.to_string(),
            platform,
            help_visible: false,
        }
    }

    /// Change the rolling sequence timeout (default 1000 ms)
    pub fn set_sequence_timeout(&mut self, timeout: Duration) {
        self.buffer.set_timeout(timeout);
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Register a shortcut in the always-live global context
    pub fn register(&mut self, definition: ShortcutDefinition) -> RegistrationId {
        self.registry.register(definition, GLOBAL_CONTEXT, 0)
    }

    /// Register a shortcut scoped to a context with an explicit priority
    pub fn register_scoped(
        &mut self,
        definition: ShortcutDefinition,
        context: impl Into<String>,
        priority: i32,
    ) -> RegistrationId {
        self.registry.register(definition, context, priority)
    }

    /// Remove one registration; no-op on a stale token
    pub fn unregister(&mut self, id: RegistrationId) {
        self.registry.unregister(id);
    }

    /// Remove every registration scoped to `context`
    pub fn unregister_context(&mut self, context: &str) {
        self.registry.unregister_context(context);
    }

    /// Read-only view of the current registrations
    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Name the context whose scoped shortcuts are live alongside "global"
    pub fn set_active_context(&mut self, context: impl Into<String>) {
        self.active_context = context.into();
        tracing::debug!(context = %self.active_context, "active context changed");
    }

    pub fn active_context(&self) -> &str {
        &self.active_context
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn set_help_visible(&mut self, visible: bool) {
        self.help_visible = visible;
    }

    /// Keys buffered toward a chord, for status display
    pub fn pending_sequence(&self) -> Option<String> {
        self.buffer.pending_display()
    }

    /// Discard any in-progress sequence state
    pub fn reset_sequence(&mut self) {
        self.buffer.clear();
    }

    /// Registry grouped by category for help rendering
    pub fn help_entries(&self) -> BTreeMap<Category, Vec<HelpEntry>> {
        help::group_by_category(&self.registry, self.platform)
    }

    /// Dispatch a key event using the wall clock
    pub fn dispatch(&mut self, event: &KeyEvent) -> DispatchResult {
        self.dispatch_at(event, Instant::now())
    }

    /// Dispatch a key event at an explicit instant
    ///
    /// Hosts with their own clock (replays, tests) drive the sequence
    /// timeout deterministically through this entry point.
    pub fn dispatch_at(&mut self, event: &KeyEvent, now: Instant) -> DispatchResult {
        let stroke = normalize(event, self.platform);
        let is_input = event.target.is_editable();

        if let Some(result) = self.dispatch_sequences(&stroke, is_input, now) {
            return result;
        }

        if let Some(result) = self.dispatch_help_keys(&stroke, is_input) {
            return result;
        }

        self.dispatch_single_key(&stroke, is_input)
    }

    /// Sequence phase: returns Some when the event was consumed
    fn dispatch_sequences(
        &mut self,
        stroke: &Keystroke,
        is_input: bool,
        now: Instant,
    ) -> Option<DispatchResult> {
        let candidates = self.candidate_indices(true, is_input);
        if candidates.is_empty() {
            // Typing in a form (or no sequences registered) never builds
            // chord state
            return None;
        }

        self.buffer.push(stroke.key, now);

        let mut pending = false;
        let mut fired = None;
        for &idx in &candidates {
            let definition = &self.registry.shortcuts()[idx].definition;
            let Trigger::Sequence(seq) = &definition.trigger else {
                continue;
            };
            match match_tail(self.buffer.keys(), seq) {
                SeqMatch::Exact => {
                    fired = Some((idx, definition.prevent_default));
                    break;
                }
                SeqMatch::Prefix => pending = true,
                SeqMatch::None => {}
            }
        }

        if let Some((idx, prevent_default)) = fired {
            tracing::debug!(
                shortcut = %self.registry.shortcuts()[idx].definition.id,
                "sequence shortcut fired"
            );
            self.buffer.clear();
            self.registry.invoke(idx);
            return Some(DispatchResult::Fired { prevent_default });
        }
        if pending {
            tracing::trace!(buffer = ?self.buffer.keys(), "sequence pending");
            return Some(DispatchResult::AwaitMore);
        }
        None
    }

    /// Built-in help-overlay keys, above every registered shortcut
    fn dispatch_help_keys(&mut self, stroke: &Keystroke, is_input: bool) -> Option<DispatchResult> {
        let toggle = (stroke.key == KeyCode::Char('?') && !stroke.mods.cmd() && !stroke.mods.alt())
            || (stroke.key == KeyCode::Char('/') && stroke.mods.cmd() && !stroke.mods.alt());
        if toggle && !is_input {
            self.help_visible = !self.help_visible;
            tracing::debug!(visible = self.help_visible, "help overlay toggled");
            self.buffer.clear();
            return Some(DispatchResult::Fired {
                prevent_default: true,
            });
        }
        if self.help_visible && stroke.key == KeyCode::Escape && stroke.mods.is_empty() {
            self.help_visible = false;
            self.buffer.clear();
            return Some(DispatchResult::Fired {
                prevent_default: true,
            });
        }
        None
    }

    /// Single-key phase: first passing candidate in precedence order fires
    fn dispatch_single_key(&mut self, stroke: &Keystroke, is_input: bool) -> DispatchResult {
        for idx in self.candidate_indices(false, is_input) {
            let definition = &self.registry.shortcuts()[idx].definition;
            let Trigger::Key(key) = &definition.trigger else {
                continue;
            };
            if *key != stroke.key {
                continue;
            }
            if definition.mods != stroke.mods {
                continue;
            }
            let prevent_default = definition.prevent_default;
            tracing::debug!(shortcut = %definition.id, "shortcut fired");
            self.buffer.clear();
            self.registry.invoke(idx);
            return DispatchResult::Fired { prevent_default };
        }
        tracing::trace!(key = %stroke.key, "no shortcut matched");
        DispatchResult::NoMatch
    }

    /// Indices of eligible registrations, highest precedence first
    ///
    /// Eligible: trigger kind matches, visible in the active context, and
    /// permitted by the input guard (Escape-bound shortcuts bypass it).
    /// Stable sort keeps registration order among equal priorities.
    fn candidate_indices(&self, sequences: bool, is_input: bool) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .registry
            .shortcuts()
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let definition = &entry.definition;
                if definition.trigger.is_sequence() != sequences {
                    return false;
                }
                if !entry.visible_in(&self.active_context) {
                    return false;
                }
                if is_input && !definition.allow_in_input {
                    return matches!(definition.trigger, Trigger::Key(KeyCode::Escape));
                }
                true
            })
            .map(|(idx, _)| idx)
            .collect();
        indices.sort_by(|&a, &b| {
            let shortcuts = self.registry.shortcuts();
            shortcuts[b]
                .effective_priority()
                .cmp(&shortcuts[a].effective_priority())
        });
        indices
    }
}

impl Default for ShortcutEngine {
    fn default() -> Self {
        Self::new()
    }
}

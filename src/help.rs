//! Help surface: read-only projection of the registry for documentation
//!
//! Groups registrations by category and de-duplicates identical bindings
//! so a shortcut registered by several mounted instances displays once.

use std::collections::{BTreeMap, HashSet};

use crate::normalize::Platform;
use crate::registry::ShortcutRegistry;
use crate::shortcut::{Category, Trigger};
use crate::types::{Keystroke, Modifiers};

/// One displayable row of the shortcut help overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub id: String,
    /// Platform-aware key display ("⌘K", "Ctrl+K", "g c")
    pub keys: String,
    pub description: Option<String>,
}

/// Project the registry into category buckets for rendering
///
/// Entries with identical (trigger, modifiers) signatures collapse into
/// one row; the first registered wins. Never mutates the registry.
pub fn group_by_category(
    registry: &ShortcutRegistry,
    platform: Platform,
) -> BTreeMap<Category, Vec<HelpEntry>> {
    let mut groups: BTreeMap<Category, Vec<HelpEntry>> = BTreeMap::new();
    let mut seen = HashSet::new();

    for entry in registry.shortcuts() {
        let definition = &entry.definition;
        let signature = (
            definition.trigger.is_sequence(),
            definition.trigger.signature(),
            definition.mods,
        );
        if !seen.insert(signature) {
            continue;
        }
        groups
            .entry(definition.category)
            .or_default()
            .push(HelpEntry {
                id: definition.id.clone(),
                keys: display_keys(&definition.trigger, definition.mods, platform),
                description: definition.description.clone(),
            });
    }

    groups
}

fn display_keys(trigger: &Trigger, mods: Modifiers, platform: Platform) -> String {
    match trigger {
        Trigger::Key(key) => Keystroke::new(*key, mods).display_string(platform),
        Trigger::Sequence(keys) => keys
            .iter()
            .map(|k| Keystroke::key(*k).display_string(platform))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

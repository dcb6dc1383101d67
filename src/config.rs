//! YAML configuration parsing for shortcut sets
//!
//! Parses declarative shortcut files into entries a host binds handlers to:
//!
//! ```yaml
//! shortcuts:
//!   - id: new-candidate
//!     key: "mod+n"
//!     category: candidates
//!     description: "New candidate"
//!   - id: goto-candidates
//!     sequence: ["g", "c"]
//!     category: navigation
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::shortcut::{Category, Handler, ShortcutDefinition, Trigger};
use crate::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a shortcuts YAML file
#[derive(Debug, Deserialize)]
pub struct ShortcutsConfig {
    pub shortcuts: Vec<ShortcutEntry>,
}

/// A single entry from YAML
#[derive(Debug, Deserialize)]
pub struct ShortcutEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub sequence: Option<Vec<String>>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub global: bool,
    #[serde(default)]
    pub allow_in_input: bool,
    #[serde(default = "default_true")]
    pub prevent_default: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

/// A validated entry awaiting its runtime handler
#[derive(Debug, Clone)]
pub struct ParsedShortcut {
    pub id: Option<String>,
    pub trigger: Trigger,
    pub mods: Modifiers,
    pub context: String,
    pub priority: i32,
    pub category: Category,
    pub global: bool,
    pub allow_in_input: bool,
    pub prevent_default: bool,
    pub description: Option<String>,
}

impl ParsedShortcut {
    /// Attach a handler, producing the definition plus its registration
    /// scope for [`crate::ShortcutRegistry::register`]
    pub fn bind(self, handler: Handler) -> (ShortcutDefinition, String, i32) {
        let mut definition = match self.trigger {
            Trigger::Key(key) => {
                let mut def = ShortcutDefinition::key(key, || {});
                def.handler = handler;
                def.mods = self.mods;
                def
            }
            Trigger::Sequence(keys) => {
                let mut def = ShortcutDefinition::sequence(keys, || {});
                def.handler = handler;
                def
            }
        };
        if let Some(id) = self.id {
            definition = definition.with_id(id);
        }
        definition.category = self.category;
        definition.global = self.global;
        definition.allow_in_input = self.allow_in_input;
        definition.prevent_default = self.prevent_default;
        definition.description = self.description;
        (definition, self.context, self.priority)
    }
}

/// Load a shortcut set from a YAML file
pub fn load_shortcuts_file(path: &Path) -> Result<Vec<ParsedShortcut>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    parse_shortcuts_yaml(&content)
}

/// Parse a shortcut set from a YAML string
///
/// An entry must carry exactly one of `key` / `sequence`; anything else is
/// rejected rather than silently tolerated.
pub fn parse_shortcuts_yaml(yaml: &str) -> Result<Vec<ParsedShortcut>, ConfigError> {
    let config: ShortcutsConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let mut parsed = Vec::with_capacity(config.shortcuts.len());
    for entry in config.shortcuts {
        parsed.push(parse_entry(entry)?);
    }
    Ok(parsed)
}

fn parse_entry(entry: ShortcutEntry) -> Result<ParsedShortcut, ConfigError> {
    let (trigger, mods) = match (&entry.key, &entry.sequence) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::AmbiguousTrigger(entry.id.unwrap_or_default()))
        }
        (None, None) => return Err(ConfigError::MissingTrigger(entry.id.unwrap_or_default())),
        (Some(key), None) => {
            let stroke = parse_key_string(key)?;
            (Trigger::Key(stroke.key), stroke.mods)
        }
        (None, Some(sequence)) => {
            let keys = sequence
                .iter()
                .map(|k| parse_key_code(&k.to_lowercase()))
                .collect::<Result<Vec<_>, _>>()?;
            (Trigger::Sequence(keys), Modifiers::NONE)
        }
    };

    Ok(ParsedShortcut {
        id: entry.id,
        trigger,
        mods,
        context: entry
            .context
            .unwrap_or_else(|| crate::registry::GLOBAL_CONTEXT.to_string()),
        priority: entry.priority,
        category: entry.category.unwrap_or_default(),
        global: entry.global,
        allow_in_input: entry.allow_in_input,
        prevent_default: entry.prevent_default,
        description: entry.description,
    })
}

/// Parse a key string like "mod+shift+k" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, ConfigError> {
    let parts: Vec<&str> = key_str.split('+').collect();

    if parts.is_empty() {
        return Err(ConfigError::InvalidKey(key_str.to_string()));
    }

    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in parts {
        let part_lower = part.to_lowercase();
        match part_lower.as_str() {
            "mod" | "cmd" | "ctrl" | "control" => {
                mods = mods | Modifiers::CMD;
            }
            "shift" => {
                mods = mods | Modifiers::SHIFT;
            }
            "alt" | "option" | "opt" => {
                mods = mods | Modifiers::ALT;
            }
            _ => {
                if key_part.is_some() {
                    return Err(ConfigError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| ConfigError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

/// Parse a key code from a lowercase string
pub fn parse_key_code(key: &str) -> Result<KeyCode, ConfigError> {
    // Single character
    if key.chars().count() == 1 {
        let c = key.chars().next().unwrap();
        return Ok(KeyCode::char(c));
    }

    // Named keys
    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),

        "f1" => Ok(KeyCode::F(1)),
        "f2" => Ok(KeyCode::F(2)),
        "f3" => Ok(KeyCode::F(3)),
        "f4" => Ok(KeyCode::F(4)),
        "f5" => Ok(KeyCode::F(5)),
        "f6" => Ok(KeyCode::F(6)),
        "f7" => Ok(KeyCode::F(7)),
        "f8" => Ok(KeyCode::F(8)),
        "f9" => Ok(KeyCode::F(9)),
        "f10" => Ok(KeyCode::F(10)),
        "f11" => Ok(KeyCode::F(11)),
        "f12" => Ok(KeyCode::F(12)),

        _ => Err(ConfigError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// The user's shortcut override file
///
/// Returns `~/.config/keyroute/shortcuts.yaml` on Unix,
/// `%APPDATA%\keyroute\shortcuts.yaml` on Windows.
pub fn user_shortcuts_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("keyroute").join("shortcuts.yaml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        dirs::config_dir().map(|config| config.join("keyroute").join("shortcuts.yaml"))
    }
}

/// Errors that can occur when parsing shortcut sets
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    InvalidKey(String),
    /// Entry supplies both `key` and `sequence`
    AmbiguousTrigger(String),
    /// Entry supplies neither `key` nor `sequence`
    MissingTrigger(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            ConfigError::AmbiguousTrigger(id) => {
                write!(f, "Entry '{}' has both key and sequence", id)
            }
            ConfigError::MissingTrigger(id) => {
                write!(f, "Entry '{}' has neither key nor sequence", id)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

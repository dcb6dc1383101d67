//! Context-aware keyboard shortcut registry and dispatch engine
//!
//! UI regions register shortcuts against a shared engine as they mount and
//! remove them as they tear down; the engine resolves every key-down event
//! to at most one handler under a priority and context model, including
//! multi-key sequences with a rolling timeout.
//!
//! # Architecture
//!
//! ```text
//! host KeyEvent → normalize() → ShortcutEngine::dispatch() → handler()
//!                                ├─ sequence matcher (chords)
//!                                ├─ built-in help keys
//!                                └─ single-key precedence scan
//! ```
//!
//! # Example
//!
//! ```
//! use keyroute::{KeyCode, KeyEvent, ShortcutDefinition, ShortcutEngine};
//!
//! let mut engine = ShortcutEngine::new();
//! engine.register_scoped(
//!     ShortcutDefinition::key(KeyCode::char('k'), || println!("focus board")),
//!     "kanban",
//!     0,
//! );
//! engine.set_active_context("kanban");
//! engine.dispatch(&KeyEvent::char('k'));
//! ```

pub mod config;
pub mod dispatcher;
pub mod focus;
pub mod help;
pub mod normalize;
pub mod registry;
pub mod sequence;
pub mod shortcut;
pub mod types;
pub mod winit_adapter;

// Re-export commonly used types
pub use config::{load_shortcuts_file, parse_key_string, parse_shortcuts_yaml, ConfigError};
pub use dispatcher::{DispatchResult, ShortcutEngine};
pub use focus::FocusTarget;
pub use help::HelpEntry;
pub use normalize::{normalize, KeyEvent, Platform};
pub use registry::{RegistrationId, ShortcutRegistry, GLOBAL_CONTEXT, GLOBAL_PRIORITY};
pub use sequence::{SequenceBuffer, DEFAULT_SEQUENCE_TIMEOUT};
pub use shortcut::{Category, Handler, ShortcutDefinition, Trigger};
pub use types::{KeyCode, Keystroke, Modifiers};
pub use winit_adapter::key_event_from_winit;

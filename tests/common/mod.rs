//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use keyroute::{KeyCode, Platform, ShortcutDefinition, ShortcutEngine};

/// An engine with Ctrl-as-primary modifier semantics, regardless of the
/// platform the tests run on
pub fn test_engine() -> ShortcutEngine {
    ShortcutEngine::with_platform(Platform::Other)
}

/// A shared invocation counter plus a handler that bumps it
pub fn counter() -> (Rc<Cell<usize>>, impl FnMut()) {
    let count = Rc::new(Cell::new(0));
    let captured = Rc::clone(&count);
    (count, move || captured.set(captured.get() + 1))
}

/// A counting single-key definition
pub fn counting_key(key: char) -> (Rc<Cell<usize>>, ShortcutDefinition) {
    let (count, handler) = counter();
    (count, ShortcutDefinition::key(KeyCode::char(key), handler))
}

/// A counting sequence definition
pub fn counting_sequence(keys: &str) -> (Rc<Cell<usize>>, ShortcutDefinition) {
    let (count, handler) = counter();
    let keys = keys.chars().map(KeyCode::char).collect();
    (count, ShortcutDefinition::sequence(keys, handler))
}

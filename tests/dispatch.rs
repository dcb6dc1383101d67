//! Dispatcher behavior: matching rules, precedence, input guard
//!
//! Covers single-key resolution end to end through the public API: modifier
//! exclusivity, context isolation, priority ordering, and the editable-
//! target guard with its Escape exemption.

mod common;

use common::{counter, counting_key, test_engine};
use keyroute::{
    DispatchResult, FocusTarget, KeyCode, KeyEvent, Modifiers, ShortcutDefinition,
};

// ========================================================================
// Basic binding
// ========================================================================

#[test]
fn test_escape_fires_while_input_focused() {
    let mut engine = test_engine();
    let (count, handler) = counter();
    engine.register(ShortcutDefinition::key(KeyCode::Escape, handler));

    let result = engine.dispatch(&KeyEvent::new(KeyCode::Escape).on(FocusTarget::TextInput));
    assert_eq!(
        result,
        DispatchResult::Fired {
            prevent_default: true
        }
    );
    assert_eq!(count.get(), 1);
}

#[test]
fn test_unregistered_key_does_nothing() {
    let mut engine = test_engine();
    let (count, definition) = counting_key('n');
    engine.register(definition);

    assert_eq!(engine.dispatch(&KeyEvent::char('x')), DispatchResult::NoMatch);
    assert_eq!(count.get(), 0);
}

// ========================================================================
// Modifier exclusivity
// ========================================================================

#[test]
fn test_plain_shortcut_rejects_modified_press() {
    let mut engine = test_engine();
    let (count, definition) = counting_key('n');
    engine.register(definition);

    engine.dispatch(&KeyEvent::char('n').with_ctrl());
    engine.dispatch(&KeyEvent::char('n').with_shift());
    engine.dispatch(&KeyEvent::char('n').with_alt());
    assert_eq!(count.get(), 0);

    engine.dispatch(&KeyEvent::char('n'));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_modifier_collision_routes_to_the_right_binding() {
    let mut engine = test_engine();
    let (plain, handler_plain) = counter();
    let (modified, handler_modified) = counter();
    engine.register(ShortcutDefinition::key(KeyCode::char('n'), handler_plain).with_id("plain"));
    engine.register(
        ShortcutDefinition::key(KeyCode::char('n'), handler_modified)
            .with_mods(Modifiers::CMD)
            .with_id("modified"),
    );

    engine.dispatch(&KeyEvent::char('n').with_ctrl());
    assert_eq!(plain.get(), 0);
    assert_eq!(modified.get(), 1);

    engine.dispatch(&KeyEvent::char('N'));
    assert_eq!(plain.get(), 1);
    assert_eq!(modified.get(), 1);
}

#[test]
fn test_required_modifier_must_be_pressed() {
    let mut engine = test_engine();
    let (count, handler) = counter();
    engine.register(
        ShortcutDefinition::key(KeyCode::char('s'), handler)
            .with_mods(Modifiers::CMD | Modifiers::SHIFT),
    );

    engine.dispatch(&KeyEvent::char('s').with_ctrl());
    assert_eq!(count.get(), 0);

    engine.dispatch(&KeyEvent::char('s').with_ctrl().with_shift());
    assert_eq!(count.get(), 1);
}

// ========================================================================
// Input guard
// ========================================================================

#[test]
fn test_plain_shortcut_suppressed_in_input() {
    let mut engine = test_engine();
    let (count, definition) = counting_key('n');
    engine.register(definition);

    let result = engine.dispatch(&KeyEvent::char('n').on(FocusTarget::TextInput));
    assert_eq!(result, DispatchResult::NoMatch);
    assert_eq!(count.get(), 0);
}

#[test]
fn test_allow_in_input_fires_while_typing() {
    let mut engine = test_engine();
    let (count, handler) = counter();
    engine.register(
        ShortcutDefinition::key(KeyCode::char('k'), handler)
            .with_mods(Modifiers::CMD)
            .allow_in_input(),
    );

    engine.dispatch(&KeyEvent::char('k').with_ctrl().on(FocusTarget::TextArea));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_guard_applies_to_every_editable_role() {
    let mut engine = test_engine();
    let (count, definition) = counting_key('n');
    engine.register(definition);

    for target in [
        FocusTarget::TextInput,
        FocusTarget::TextArea,
        FocusTarget::Select,
        FocusTarget::ContentEditable,
    ] {
        engine.dispatch(&KeyEvent::char('n').on(target));
    }
    assert_eq!(count.get(), 0);

    engine.dispatch(&KeyEvent::char('n').on(FocusTarget::Other));
    assert_eq!(count.get(), 1);
}

// ========================================================================
// Context isolation and precedence
// ========================================================================

#[test]
fn test_context_isolation() {
    let mut engine = test_engine();
    let (count, handler) = counter();
    engine.register_scoped(
        ShortcutDefinition::key(KeyCode::char('k'), handler),
        "kanban",
        0,
    );

    engine.set_active_context("other");
    engine.dispatch(&KeyEvent::char('k'));
    assert_eq!(count.get(), 0);

    engine.set_active_context("kanban");
    engine.dispatch(&KeyEvent::char('k'));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_global_context_always_live() {
    let mut engine = test_engine();
    let (count, definition) = counting_key('n');
    engine.register(definition);

    engine.set_active_context("vacancies");
    engine.dispatch(&KeyEvent::char('n'));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_higher_priority_wins() {
    let mut engine = test_engine();
    let (low, handler_low) = counter();
    let (high, handler_high) = counter();
    engine.register_scoped(
        ShortcutDefinition::key(KeyCode::char('k'), handler_low).with_id("low"),
        "kanban",
        0,
    );
    engine.register_scoped(
        ShortcutDefinition::key(KeyCode::char('k'), handler_high).with_id("high"),
        "kanban",
        10,
    );

    engine.set_active_context("kanban");
    engine.dispatch(&KeyEvent::char('k'));
    assert_eq!(low.get(), 0);
    assert_eq!(high.get(), 1);
}

#[test]
fn test_global_flag_outranks_context_match() {
    let mut engine = test_engine();
    let (scoped, handler_scoped) = counter();
    let (global, handler_global) = counter();
    engine.register_scoped(
        ShortcutDefinition::key(KeyCode::char('k'), handler_scoped).with_id("scoped"),
        "kanban",
        0,
    );
    engine.register_scoped(
        ShortcutDefinition::key(KeyCode::char('k'), handler_global)
            .with_id("everywhere")
            .global(),
        "vacancies",
        0,
    );

    // Visible from an unrelated context despite its tag
    engine.set_active_context("candidates");
    engine.dispatch(&KeyEvent::char('k'));
    assert_eq!(global.get(), 1);

    // And it outranks the context-local binding where both are live
    engine.set_active_context("kanban");
    engine.dispatch(&KeyEvent::char('k'));
    assert_eq!(global.get(), 2);
    assert_eq!(scoped.get(), 0);
}

// ========================================================================
// Single-fire invariant
// ========================================================================

#[test]
fn test_at_most_one_handler_per_event() {
    let mut engine = test_engine();
    let (a, handler_a) = counter();
    let (b, handler_b) = counter();
    let (c, handler_c) = counter();
    engine.register(ShortcutDefinition::key(KeyCode::char('n'), handler_a).with_id("a"));
    engine.register(ShortcutDefinition::key(KeyCode::char('n'), handler_b).with_id("b"));
    engine.register_scoped(
        ShortcutDefinition::key(KeyCode::char('n'), handler_c).with_id("c"),
        "kanban",
        50,
    );

    engine.set_active_context("kanban");
    engine.dispatch(&KeyEvent::char('n'));
    assert_eq!(a.get() + b.get() + c.get(), 1);
    assert_eq!(c.get(), 1);
}

#[test]
fn test_prevent_default_reported_per_definition() {
    let mut engine = test_engine();
    engine.register(ShortcutDefinition::key(KeyCode::char('a'), || {}));
    engine.register(ShortcutDefinition::key(KeyCode::char('b'), || {}).passive());

    assert_eq!(
        engine.dispatch(&KeyEvent::char('a')),
        DispatchResult::Fired {
            prevent_default: true
        }
    );
    assert_eq!(
        engine.dispatch(&KeyEvent::char('b')),
        DispatchResult::Fired {
            prevent_default: false
        }
    );
}

// ========================================================================
// Platform normalization through dispatch
// ========================================================================

#[test]
fn test_meta_is_primary_on_macos() {
    let mut engine = keyroute::ShortcutEngine::with_platform(keyroute::Platform::MacOs);
    let (count, handler) = counter();
    engine.register(ShortcutDefinition::key(KeyCode::char('k'), handler).with_mods(Modifiers::CMD));

    engine.dispatch(&KeyEvent::char('k').with_ctrl());
    assert_eq!(count.get(), 0);

    engine.dispatch(&KeyEvent::char('k').with_meta());
    assert_eq!(count.get(), 1);
}

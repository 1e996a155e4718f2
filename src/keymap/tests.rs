//! Integration tests for the keymap system

use std::sync::Arc;

use super::*;

fn matcher_for(conf: &str) -> SequenceMatcher {
    SequenceMatcher::new(Arc::new(BindingTable::from_conf_str(conf)))
}

fn seek(seconds: f64) -> KeyAction {
    KeyAction::Execute(Action::Seek {
        seconds,
        flags: None,
    })
}

#[test]
fn test_shift_binding_fires_on_uppercase() {
    let mut m = matcher_for("Shift+b seek 3\n");
    assert_eq!(m.handle_keystroke(Keystroke::char('B')), seek(3.0));

    // Event layer reporting shift separately
    let shifted = Keystroke::from_event("b", Modifiers::SHIFT).unwrap();
    assert_eq!(m.handle_keystroke(shifted), seek(3.0));
    assert_eq!(m.handle_keystroke(Keystroke::char('b')), KeyAction::NoMatch);
}

#[test]
fn test_shift_spellings_last_one_wins() {
    let table = BindingTable::from_conf_str("Shift+f seek 1\nF seek 2\nShift+F seek 3\n");
    let mut m = SequenceMatcher::new(Arc::new(table));
    assert_eq!(m.handle_keystroke(Keystroke::char('F')), seek(3.0));
}

#[test]
fn test_duplicate_binding_executes_last() {
    let mut m = matcher_for(
        "a set window-scale 1.0\n[ seek -6\n[ seek -7\n[ seek -5\n[ seek -8\n\
         ] seek 9\n] seek 11\n] seek 13\n] seek 15\n] seek 14\n] seek 10\n] seek 12\n",
    );
    assert_eq!(m.handle_keystroke(Keystroke::char('[')), seek(-8.0));
    assert_eq!(m.handle_keystroke(Keystroke::char(']')), seek(12.0));
}

#[test]
fn test_menu_shows_first_declared_for_same_action() {
    let table = BindingTable::from_conf_str("c seek -5\nd seek -5\nx seek -5\n");
    let found = select_menu_equivalents(&table, &default_menu_slots());
    let back = found.iter().find(|e| e.slot == "step-backward").unwrap();
    assert_eq!(back.keystroke, Keystroke::char('c'));

    // Every key still executes
    let mut m = SequenceMatcher::new(Arc::new(table));
    assert_eq!(m.handle_keystroke(Keystroke::char('x')), seek(-5.0));
}

#[test]
fn test_sequences_with_modifiers_and_minus() {
    let mut m = matcher_for("Ctrl+x-Ctrl+s quit\n--a cycle mute\n");
    let ctrl = Modifiers::CTRL;

    assert_eq!(
        m.handle_keystroke(Keystroke::char_with_mods('x', ctrl)),
        KeyAction::Ignore
    );
    assert_eq!(
        m.handle_keystroke(Keystroke::char_with_mods('s', ctrl)),
        KeyAction::Execute(Action::Quit)
    );

    assert_eq!(m.handle_keystroke(Keystroke::char('-')), KeyAction::Ignore);
    assert_eq!(
        m.handle_keystroke(Keystroke::char('a')),
        KeyAction::Execute(Action::Cycle {
            property: "mute".to_string()
        })
    );
}

#[test]
fn test_defaults_through_matcher() {
    let mut m = SequenceMatcher::new(Arc::new(default_table()));
    assert_eq!(m.handle_keystroke(Keystroke::plain(KeyCode::Right)), seek(5.0));
    assert_eq!(m.handle_keystroke(Keystroke::char('g')), KeyAction::Ignore);
    assert_eq!(
        m.handle_keystroke(Keystroke::char('g')),
        KeyAction::Execute(Action::Seek {
            seconds: 0.0,
            flags: Some("absolute".to_string())
        })
    );
}

#[test]
fn test_reload_swaps_table() {
    let mut m = SequenceMatcher::new(Arc::new(default_table()));
    m.handle_keystroke(Keystroke::char('g'));
    assert!(m.has_pending());

    let reloaded = Arc::new(BindingTable::from_conf_str("g quit\n"));
    m.set_table(Arc::clone(&reloaded));
    assert!(!m.has_pending());
    assert_eq!(
        m.handle_keystroke(Keystroke::char('g')),
        KeyAction::Execute(Action::Quit)
    );
    assert!(Arc::ptr_eq(m.table(), &reloaded));
}

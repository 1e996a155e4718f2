//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use keyseq::keymap::{Action, BindingTable, KeyAction, Keystroke, SequenceMatcher};

/// Bindings exercised by the sequence tests
pub const SEQUENCE_CONF: &str = "\
a set window-scale 1.0
b set window-scale 1.5
c set window-scale 2.0
d ignore
e ignore
f ignore
d-e-f set window-scale 1.8
d-d-e set window-scale 2.1
d-d-d-e set window-scale 2.2
d-d-d-d-e set window-scale 1.7
g ignore
h ignore
i ignore
g-h-i set window-scale 1.2
j seek -5
k-l-m-n set window-scale 1.6
m-n-o-p set window-scale 1.8
q-r-s-t-w set window-scale 1.9
";

/// Create a matcher over the given input.conf text
pub fn matcher(conf: &str) -> SequenceMatcher {
    SequenceMatcher::new(Arc::new(BindingTable::from_conf_str(conf)))
}

/// Parse a single keystroke token
pub fn ks(token: &str) -> Keystroke {
    token.parse().unwrap()
}

/// Type each character as a plain keystroke, collecting the outcomes
pub fn typed(matcher: &mut SequenceMatcher, keys: &str) -> Vec<KeyAction> {
    keys.chars()
        .map(|c| matcher.handle_keystroke(Keystroke::char(c)))
        .collect()
}

/// Expected outcome of a `set window-scale` binding
pub fn scale(value: &str) -> KeyAction {
    KeyAction::Execute(Action::Set {
        property: "window-scale".to_string(),
        value: value.to_string(),
    })
}

/// The window scale most recently set by a list of outcomes
pub fn last_scale(outcomes: &[KeyAction]) -> Option<String> {
    outcomes.iter().rev().find_map(|o| match o {
        KeyAction::Execute(Action::Set { property, value }) if property == "window-scale" => {
            Some(value.clone())
        }
        _ => None,
    })
}

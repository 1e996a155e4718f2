//! Key sequence bindings in mpv `input.conf` syntax
//!
//! This module provides the keystroke and binding engine:
//! - Splits key descriptors such as `Ctrl+T-L` into keystrokes
//! - Folds `Shift` into character keys so `Shift+b`, `Shift+B` and `B` agree
//! - Resolves duplicate bindings (last declaration wins)
//! - Matches multi-key sequences (up to four keys) against recent input
//! - Picks the key equivalent shown for each menu item (first declaration wins)
//!
//! # Architecture
//!
//! ```text
//! input.conf → ConfLine → BindingTable (Arc) ─┐
//! key event → Keystroke → SequenceMatcher ────┴→ KeyAction
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use keyseq::keymap::{BindingTable, KeyAction, Keystroke, SequenceMatcher};
//!
//! let table = BindingTable::from_conf_str("d-e-f set window-scale 1.8\n");
//! let mut matcher = SequenceMatcher::new(Arc::new(table));
//!
//! assert_eq!(matcher.handle_keystroke(Keystroke::char('d')), KeyAction::Ignore);
//! assert_eq!(matcher.handle_keystroke(Keystroke::char('e')), KeyAction::Ignore);
//! assert!(matches!(
//!     matcher.handle_keystroke(Keystroke::char('f')),
//!     KeyAction::Execute(_)
//! ));
//! ```

mod action;
mod binding;
mod config;
mod defaults;
mod error;
mod matcher;
mod menu;
mod notation;
mod sequence;
mod table;
mod types;

pub use action::{split_section, Action, EXTENSION_PREFIX};
pub use binding::{BindingOrigin, KeyBinding};
pub use config::{load_input_conf, parse_conf_line, parse_input_conf, ConfLine};
pub use defaults::{default_conf_lines, default_table, load_bindings, DEFAULT_INPUT_CONF};
pub use error::KeymapError;
pub use matcher::{KeyAction, MatchOrder, SequenceMatcher};
pub use menu::{default_menu_slots, select_menu_equivalents, MenuEquivalent, MenuSlot, SlotMatch};
pub use notation::{split_keystrokes, split_keystrokes_checked, KeystrokeSplit};
pub use sequence::{KeySequence, MAX_SEQUENCE_LEN};
pub use table::{BindingEntry, BindingTable, BindingTableBuilder, LoadDiagnostic};
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;

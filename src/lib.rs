//! keyseq - mpv-style key sequence bindings
//!
//! This crate provides the keystroke notation parser, the fixed-capacity ring
//! buffer that holds recent keys, and the matcher that resolves key sequences
//! against an `input.conf` binding table.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod ring_buffer;
pub mod tracing;

// Re-export commonly used types
pub use config::Settings;
pub use keymap::{Action, BindingTable, KeyAction, Keystroke, SequenceMatcher};
pub use ring_buffer::RingBuffer;

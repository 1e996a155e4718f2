//! Errors produced while parsing keystrokes, sequences and bindings

use super::sequence::MAX_SEQUENCE_LEN;

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Key sequence exceeds {max} keystrokes: {0}", max = MAX_SEQUENCE_LEN)]
    SequenceTooLong(String),
    #[error("Missing action for key: {0}")]
    EmptyAction(String),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Adding bindings to input section '{0}' is not supported")]
    UnsupportedSection(String),
}

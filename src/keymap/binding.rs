//! Key binding struct representing a mapping from a key sequence to an action

use super::action::{Action, EXTENSION_PREFIX};
use super::sequence::KeySequence;
use super::types::Keystroke;

/// Where a binding was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingOrigin {
    /// The embedded default `input.conf`
    Default,
    /// The user's `input.conf` or pairs passed in by the caller
    User,
    /// Synthesized `ignore` placeholder for the prefix of a longer sequence
    PartialSequence,
}

/// A single binding mapping one to four keystrokes to an action
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    /// The keystroke sequence (usually 1, sometimes up to 4)
    pub sequence: KeySequence,
    /// The action to execute
    pub action: Action,
    /// The descriptor exactly as it appeared in the configuration
    pub raw_key: String,
    /// Position in declaration order
    pub index: usize,
    pub origin: BindingOrigin,
    /// Trailing `# comment` from the conf line
    pub comment: Option<String>,
}

impl KeyBinding {
    /// Create a user binding with no comment
    pub fn new(sequence: KeySequence, action: Action) -> Self {
        let raw_key = sequence.to_string();
        Self {
            sequence,
            action,
            raw_key,
            index: 0,
            origin: BindingOrigin::User,
            comment: None,
        }
    }

    /// Attach the trailing comment from the conf line
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Check if this binding matches a single keystroke (not a sequence)
    pub fn matches_single(&self, keystroke: &Keystroke) -> bool {
        self.sequence.len() == 1 && self.sequence.first() == *keystroke
    }

    /// Check if this binding starts with the given keystroke
    pub fn starts_with(&self, keystroke: &Keystroke) -> bool {
        self.sequence.first() == *keystroke
    }

    /// Check if this is a multi-keystroke binding
    pub fn is_chord(&self) -> bool {
        self.sequence.is_chord()
    }

    pub fn is_extension(&self) -> bool {
        self.action.is_extension()
    }

    /// Get display string for this binding
    pub fn display_string(&self) -> String {
        self.sequence.display_string()
    }

    /// Render the binding back into an `input.conf` line
    pub fn conf_line(&self) -> String {
        let mut line = if self.is_extension() {
            format!("{} {} {}", EXTENSION_PREFIX, self.raw_key, self.action)
        } else {
            format!("{} {}", self.raw_key, self.action)
        };
        if let Some(comment) = &self.comment {
            line.push_str(" #");
            line.push_str(comment);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    fn binding(key: &str, action: &str) -> KeyBinding {
        KeyBinding::new(KeySequence::parse(key).unwrap(), action.parse().unwrap())
    }

    #[test]
    fn test_single_binding() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL);
        let binding = binding("Ctrl+s", "screenshot");

        assert!(!binding.is_chord());
        assert!(binding.matches_single(&stroke));
    }

    #[test]
    fn test_chord_binding() {
        let binding = binding("g-h-i", "seek 10");

        assert!(binding.is_chord());
        assert!(!binding.matches_single(&Keystroke::char('g')));
        assert!(binding.starts_with(&Keystroke::char('g')));
        assert!(!binding.starts_with(&Keystroke::char('h')));
    }

    #[test]
    fn test_conf_line() {
        let plain = binding("SPACE", "cycle pause").with_comment(Some(" toggle".to_string()));
        assert_eq!(plain.conf_line(), "SPACE cycle pause # toggle");

        let mut ext = binding("Meta+p", "cycle pause");
        ext.action = Action::extension("toggle-flag pip").unwrap();
        assert_eq!(ext.conf_line(), "#@iina Meta+p toggle-flag pip");
    }
}

//! Key sequences: one to four keystrokes pressed in order

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use super::error::KeymapError;
use super::notation::split_keystrokes_checked;
use super::types::Keystroke;

/// Maximum number of keystrokes in a sequence (mpv's `MP_MAX_KEY_DOWN`)
pub const MAX_SEQUENCE_LEN: usize = 4;

/// An ordered, non-empty list of at most [`MAX_SEQUENCE_LEN`] keystrokes
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySequence(Vec<Keystroke>);

impl KeySequence {
    /// Build a sequence from keystrokes, checking the length bounds
    pub fn new(keystrokes: Vec<Keystroke>) -> Result<Self, KeymapError> {
        if keystrokes.is_empty() {
            return Err(KeymapError::InvalidKey("Empty key sequence".to_string()));
        }
        if keystrokes.len() > MAX_SEQUENCE_LEN {
            let text = keystrokes
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join("-");
            return Err(KeymapError::SequenceTooLong(text));
        }
        Ok(Self(keystrokes))
    }

    /// A sequence of exactly one keystroke
    pub fn single(keystroke: Keystroke) -> Self {
        Self(vec![keystroke])
    }

    /// Parse an `input.conf` key descriptor such as `Ctrl+x-Ctrl+s`
    pub fn parse(descriptor: &str) -> Result<Self, KeymapError> {
        let split = split_keystrokes_checked(descriptor);
        if split.truncated {
            return Err(KeymapError::SequenceTooLong(descriptor.to_string()));
        }
        if split.malformed {
            return Err(KeymapError::InvalidKey(format!(
                "Malformed key sequence: {}",
                descriptor
            )));
        }

        let keystrokes = split
            .tokens
            .iter()
            .map(|token| token.parse::<Keystroke>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keystrokes)
    }

    pub fn keystrokes(&self) -> &[Keystroke] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; sequences are non-empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this is a chord (multi-keystroke) sequence
    pub fn is_chord(&self) -> bool {
        self.0.len() > 1
    }

    pub fn first(&self) -> Keystroke {
        self.0[0]
    }

    /// Check if this sequence starts with the given keystrokes
    pub fn starts_with(&self, prefix: &[Keystroke]) -> bool {
        self.0.starts_with(prefix)
    }

    /// Proper prefixes, shortest first (`a`, `a-b` for `a-b-c`)
    pub fn prefixes(&self) -> impl Iterator<Item = &[Keystroke]> {
        (1..self.0.len()).map(move |n| &self.0[..n])
    }

    /// Proper prefixes as owned sequences, shortest first
    pub fn prefix_sequences(&self) -> impl Iterator<Item = KeySequence> + '_ {
        self.prefixes().map(|p| Self(p.to_vec()))
    }

    /// Get display string using platform symbols
    pub fn display_string(&self) -> String {
        self.0
            .iter()
            .map(|k| k.display_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Borrow<[Keystroke]> for KeySequence {
    fn borrow(&self) -> &[Keystroke] {
        &self.0
    }
}

impl From<Keystroke> for KeySequence {
    fn from(keystroke: Keystroke) -> Self {
        Self::single(keystroke)
    }
}

/// Canonical mpv form: keystrokes joined by `-`
impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, k) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", k)?;
        }
        Ok(())
    }
}

impl FromStr for KeySequence {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

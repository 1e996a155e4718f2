//! Binding table: the declaration list plus the effective sequence lookup
//!
//! A table is built once per configuration load and never mutated. The
//! builder collects bindings in declaration order, then [`build`] resolves
//! duplicates (the last declaration of a sequence wins) and adds `ignore`
//! placeholders for every proper prefix of a multi-key sequence that has no
//! binding of its own.
//!
//! [`build`]: BindingTableBuilder::build

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::action::{split_section, Action};
use super::binding::{BindingOrigin, KeyBinding};
use super::config::{parse_input_conf, ConfLine};
use super::error::KeymapError;
use super::sequence::KeySequence;
use super::types::Keystroke;

/// Section name that input.conf actions may name explicitly
const DEFAULT_SECTION: &str = "default";

/// A problem found while loading bindings. The offending line is skipped or
/// disabled; loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// 1-based source line (or position in the pair list)
    pub line: usize,
    pub key: String,
    pub message: String,
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.key, self.message)
    }
}

/// A declared binding and whether it survived resolution
#[derive(Debug, Clone, PartialEq)]
pub struct BindingEntry {
    pub binding: KeyBinding,
    pub enabled: bool,
    /// Why the binding is disabled
    pub message: Option<String>,
}

/// Collects bindings in declaration order
#[derive(Debug, Default)]
pub struct BindingTableBuilder {
    entries: Vec<BindingEntry>,
    diagnostics: Vec<LoadDiagnostic>,
    pairs_seen: usize,
}

impl BindingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a `(descriptor, action)` pair
    pub fn push(&mut self, descriptor: &str, action: &str) -> &mut Self {
        self.pairs_seen += 1;
        let line = self.pairs_seen;
        self.push_raw(line, descriptor, action, false, None, BindingOrigin::User);
        self
    }

    /// Declare every line read from an `input.conf`
    pub fn push_conf_lines(&mut self, origin: BindingOrigin, lines: &[ConfLine]) -> &mut Self {
        for l in lines {
            self.push_raw(
                l.line,
                &l.key,
                &l.action,
                l.is_extension,
                l.comment.clone(),
                origin,
            );
        }
        self
    }

    fn diagnose(&mut self, line: usize, key: &str, message: String) {
        tracing::warn!(line, key, %message, "skipping binding");
        self.diagnostics.push(LoadDiagnostic {
            line,
            key: key.to_string(),
            message,
        });
    }

    fn push_raw(
        &mut self,
        line: usize,
        key: &str,
        action_text: &str,
        is_extension: bool,
        comment: Option<String>,
        origin: BindingOrigin,
    ) {
        if key == "default-bindings" && action_text.trim() == "start" {
            self.diagnose(
                line,
                key,
                "Default-level (builtin) bindings are not supported".to_string(),
            );
            return;
        }

        let sequence = match KeySequence::parse(key) {
            Ok(sequence) => sequence,
            Err(e) => return self.diagnose(line, key, e.to_string()),
        };

        let (section, action_text) = split_section(action_text);
        let disabled = match section {
            Some(DEFAULT_SECTION) | None => None,
            Some(other) => Some(KeymapError::UnsupportedSection(other.to_string()).to_string()),
        };

        let parsed = if is_extension {
            Action::extension(action_text)
        } else {
            action_text.parse::<Action>()
        };
        let action = match parsed {
            Ok(action) => action,
            Err(e) => return self.diagnose(line, key, e.to_string()),
        };

        if let Some(message) = &disabled {
            self.diagnose(line, key, message.clone());
        }

        let binding = KeyBinding {
            sequence,
            action,
            raw_key: key.to_string(),
            index: self.entries.len(),
            origin,
            comment,
        };
        self.entries.push(BindingEntry {
            binding,
            enabled: disabled.is_none(),
            message: disabled,
        });
    }

    /// Resolve duplicates and fill in partial sequences
    pub fn build(self) -> BindingTable {
        let BindingTableBuilder {
            mut entries,
            diagnostics,
            ..
        } = self;

        let declared = entries.len();
        let mut resolved: HashMap<KeySequence, usize> = HashMap::new();
        let mut overridden = 0usize;

        for idx in 0..entries.len() {
            if !entries[idx].enabled {
                continue;
            }
            let sequence = entries[idx].binding.sequence.clone();
            if let Some(prev) = resolved.insert(sequence, idx) {
                let prev = &mut entries[prev];
                prev.enabled = false;
                prev.message = Some(format!(
                    "Overridden by a later binding which also uses {:?}",
                    prev.binding.sequence.to_string()
                ));
                overridden += 1;
            }
        }

        // Walk in declaration order so placeholder order is stable
        let mut chords: Vec<usize> = resolved
            .values()
            .copied()
            .filter(|&idx| entries[idx].binding.is_chord())
            .collect();
        chords.sort_unstable();

        let mut prefixes: HashSet<KeySequence> = HashSet::new();
        for idx in chords {
            let sequence = entries[idx].binding.sequence.clone();
            for prefix in sequence.prefix_sequences() {
                prefixes.insert(prefix.clone());
                if resolved.contains_key(&prefix) {
                    continue;
                }
                let placeholder = KeyBinding {
                    raw_key: prefix.to_string(),
                    sequence: prefix.clone(),
                    action: Action::Ignore,
                    index: entries.len(),
                    origin: BindingOrigin::PartialSequence,
                    comment: Some("(partial sequence)".to_string()),
                };
                resolved.insert(prefix, entries.len());
                entries.push(BindingEntry {
                    binding: placeholder,
                    enabled: true,
                    message: None,
                });
            }
        }

        tracing::info!(
            declared,
            effective = resolved.len(),
            overridden,
            placeholders = entries.len() - declared,
            diagnostics = diagnostics.len(),
            "built binding table"
        );

        BindingTable {
            entries,
            resolved,
            prefixes,
            diagnostics,
        }
    }
}

/// Effective bindings for one configuration load
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    /// Declared bindings in order, then partial-sequence placeholders
    entries: Vec<BindingEntry>,
    /// Sequence -> index of its effective entry
    resolved: HashMap<KeySequence, usize>,
    /// Every proper prefix of an effective multi-key sequence
    prefixes: HashSet<KeySequence>,
    diagnostics: Vec<LoadDiagnostic>,
}

impl BindingTable {
    pub fn builder() -> BindingTableBuilder {
        BindingTableBuilder::new()
    }

    /// Build a table from `(descriptor, action)` pairs in declaration order
    pub fn build<I, K, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: AsRef<str>,
        A: AsRef<str>,
    {
        let mut builder = Self::builder();
        for (key, action) in pairs {
            builder.push(key.as_ref(), action.as_ref());
        }
        builder.build()
    }

    /// Build a table from `input.conf` text
    pub fn from_conf_str(text: &str) -> Self {
        let mut builder = Self::builder();
        builder.push_conf_lines(BindingOrigin::User, &parse_input_conf(text));
        builder.build()
    }

    /// Effective action for an exact sequence (placeholders give `Ignore`)
    pub fn lookup(&self, keys: &[Keystroke]) -> Option<&Action> {
        self.binding(keys).map(|b| &b.action)
    }

    /// Effective binding for an exact sequence
    pub fn binding(&self, keys: &[Keystroke]) -> Option<&KeyBinding> {
        self.resolved.get(keys).map(|&idx| &self.entries[idx].binding)
    }

    /// Check if `keys` is a proper prefix of some effective sequence
    pub fn is_prefix(&self, keys: &[Keystroke]) -> bool {
        self.prefixes.contains(keys)
    }

    /// Every declared binding in order (with its enabled state), followed by
    /// the synthesized placeholders
    pub fn entries(&self) -> &[BindingEntry] {
        &self.entries
    }

    /// Enabled, declared bindings in declaration order
    pub fn effective_bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.entries
            .iter()
            .filter(|e| e.enabled && e.binding.origin != BindingOrigin::PartialSequence)
            .map(|e| &e.binding)
    }

    pub fn diagnostics(&self) -> &[LoadDiagnostic] {
        &self.diagnostics
    }

    /// Number of distinct effective sequences, placeholders included
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// First enabled binding for an action, in declaration order
    pub fn binding_for(&self, action: &Action) -> Option<&KeyBinding> {
        self.effective_bindings().find(|b| b.action == *action)
    }

    /// Get display string for an action's binding
    pub fn display_for(&self, action: &Action) -> Option<String> {
        self.binding_for(action).map(|b| b.display_string())
    }
}

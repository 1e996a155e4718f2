//! Sequence matcher: resolves each keystroke against a binding table
//!
//! The matcher remembers the last [`MAX_SEQUENCE_LEN`] keystrokes. After
//! each keystroke it probes the suffixes of that window against the table;
//! the first suffix bound to a real action fires and clears the window.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::sequence::MAX_SEQUENCE_LEN;
use super::table::BindingTable;
use super::types::Keystroke;
use crate::ring_buffer::RingBuffer;

/// Result of handling a keystroke
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Execute this action
    Execute(Action),
    /// Keystroke was recorded and must be swallowed (it is bound to
    /// `ignore` or is a prefix of a longer sequence)
    Ignore,
    /// No binding matches this keystroke
    NoMatch,
}

/// Order in which window suffixes are probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrder {
    /// Most recent keystroke alone first, then longer suffixes
    #[default]
    ShortestFirst,
    /// Whole window first, then shorter suffixes
    LongestFirst,
}

impl MatchOrder {
    /// Suffix length to probe at step `i` of `n`
    #[inline]
    fn suffix_len(self, i: usize, n: usize) -> usize {
        match self {
            MatchOrder::ShortestFirst => i + 1,
            MatchOrder::LongestFirst => n - i,
        }
    }
}

/// Per-context key sequence state
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    table: Arc<BindingTable>,
    /// Recent keystrokes; head is the most recent
    window: RingBuffer<Keystroke>,
    order: MatchOrder,
    idle_timeout: Option<Duration>,
    last_key_at: Option<Instant>,
}

impl SequenceMatcher {
    pub fn new(table: Arc<BindingTable>) -> Self {
        Self {
            table,
            window: RingBuffer::new(MAX_SEQUENCE_LEN),
            order: MatchOrder::default(),
            idle_timeout: None,
            last_key_at: None,
        }
    }

    /// Set the suffix probe order (builder pattern)
    pub fn with_order(mut self, order: MatchOrder) -> Self {
        self.order = order;
        self
    }

    /// Clear a pending window when no key arrives within `timeout`
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub fn order(&self) -> MatchOrder {
        self.order
    }

    pub fn table(&self) -> &Arc<BindingTable> {
        &self.table
    }

    /// Swap in a freshly loaded table. The window is cleared.
    pub fn set_table(&mut self, table: Arc<BindingTable>) {
        self.table = table;
        self.reset();
        tracing::debug!(bindings = self.table.len(), "matcher table replaced");
    }

    /// Clear the recent-keys window
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_key_at = None;
    }

    /// An outside consumer (e.g. a menu key equivalent) handled the key,
    /// so any sequence in progress is abandoned
    pub fn key_was_handled(&mut self) {
        if !self.window.is_empty() {
            tracing::trace!(window = %self.window, "key handled elsewhere, clearing window");
        }
        self.reset();
    }

    /// Handle a keystroke and return the action to take
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> KeyAction {
        self.handle_keystroke_at(keystroke, Instant::now())
    }

    /// Handle a keystroke that arrived at `now`
    pub fn handle_keystroke_at(&mut self, keystroke: Keystroke, now: Instant) -> KeyAction {
        if let (Some(timeout), Some(last)) = (self.idle_timeout, self.last_key_at) {
            if now.saturating_duration_since(last) > timeout && !self.window.is_empty() {
                tracing::trace!(window = %self.window, "idle timeout, clearing window");
                self.window.clear();
            }
        }
        self.last_key_at = Some(now);

        self.window.insert_head(keystroke);
        let recent: Vec<Keystroke> = self.window.iter().copied().collect();

        let action = self.resolve(&recent);
        if matches!(action, KeyAction::Execute(_)) {
            self.window.clear();
        }
        action
    }

    /// Outcome `keystroke` would have, without recording it
    pub fn peek(&self, keystroke: Keystroke) -> KeyAction {
        let mut recent: Vec<Keystroke> = self.window.iter().copied().collect();
        recent.push(keystroke);
        let skip = recent.len().saturating_sub(MAX_SEQUENCE_LEN);
        self.resolve(&recent[skip..])
    }

    /// Check if `keystroke` would be swallowed rather than executed or
    /// passed on. Menu layers query this before firing a key equivalent.
    pub fn is_swallowed(&self, keystroke: Keystroke) -> bool {
        self.peek(keystroke) == KeyAction::Ignore
    }

    /// Probe suffixes of `recent` (oldest first) in match order
    fn resolve(&self, recent: &[Keystroke]) -> KeyAction {
        let n = recent.len();
        let mut swallowed = false;

        for i in 0..n {
            let suffix = &recent[n - self.order.suffix_len(i, n)..];
            match self.table.lookup(suffix) {
                Some(action) if action.is_ignore() => {
                    swallowed = true;
                }
                Some(action) => {
                    tracing::debug!(keys = suffix.len(), %action, "key sequence matched");
                    return KeyAction::Execute(action.clone());
                }
                None => {}
            }
        }

        tracing::trace!(swallowed, "no key sequence matched");
        if swallowed {
            KeyAction::Ignore
        } else {
            KeyAction::NoMatch
        }
    }

    /// Check if any keystrokes are waiting to complete a sequence
    pub fn has_pending(&self) -> bool {
        !self.window.is_empty()
    }

    /// Recorded keystrokes, oldest first
    pub fn pending(&self) -> Vec<Keystroke> {
        self.window.iter().copied().collect()
    }

    /// Get the pending keystrokes (for status bar display)
    pub fn pending_display(&self) -> Option<String> {
        if self.window.is_empty() {
            None
        } else {
            Some(
                self.window
                    .iter()
                    .map(|k| k.display_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }
    }
}

impl Default for SequenceMatcher {
    fn default() -> Self {
        Self::new(Arc::new(BindingTable::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF: &str = "\
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

    fn matcher() -> SequenceMatcher {
        SequenceMatcher::new(Arc::new(BindingTable::from_conf_str(CONF)))
    }

    fn scale(value: &str) -> KeyAction {
        KeyAction::Execute(Action::Set {
            property: "window-scale".to_string(),
            value: value.to_string(),
        })
    }

    fn typed(m: &mut SequenceMatcher, keys: &str) -> Vec<KeyAction> {
        keys.chars()
            .map(|c| m.handle_keystroke(Keystroke::char(c)))
            .collect()
    }

    #[test]
    fn test_single_keys() {
        let mut m = matcher();
        assert_eq!(typed(&mut m, "cab"), vec![scale("2.0"), scale("1.0"), scale("1.5")]);
        assert_eq!(typed(&mut m, "z"), vec![KeyAction::NoMatch]);
    }

    #[test]
    fn test_simple_sequence() {
        let mut m = matcher();
        assert_eq!(
            typed(&mut m, "def"),
            vec![KeyAction::Ignore, KeyAction::Ignore, scale("1.8")]
        );
        assert!(!m.has_pending());
    }

    #[test]
    fn test_sequence_wrap() {
        let mut m = matcher();
        let results = typed(&mut m, "dedde");
        assert!(results[..4].iter().all(|r| *r == KeyAction::Ignore));
        assert_eq!(results[4], scale("2.1"));
    }

    #[test]
    fn test_sequence_covers_supersequence() {
        let mut m = matcher();
        let results = typed(&mut m, "ddde");
        assert_eq!(results[3], scale("2.1"));
        // Window was cleared, so `e` alone does not re-match
        assert_eq!(typed(&mut m, "e"), vec![KeyAction::Ignore]);
        assert_eq!(m.pending(), vec![Keystroke::char('e')]);
    }

    #[test]
    fn test_longest_first_reaches_supersequence() {
        let mut m = matcher().with_order(MatchOrder::LongestFirst);
        assert_eq!(typed(&mut m, "ddde")[3], scale("2.2"));
    }

    #[test]
    fn test_long_overlapping_sequences() {
        let mut m = matcher();
        assert_eq!(typed(&mut m, "klmn")[3], scale("1.6"));
        // Window was reset, so `m-n-o-p` is not completed by `o`,`p`
        assert!(!typed(&mut m, "op").contains(&scale("1.8")));
        assert_eq!(typed(&mut m, "mnop")[3], scale("1.8"));
    }

    #[test]
    fn test_max_buffer_size_four() {
        let mut m = matcher();
        let results = typed(&mut m, "qrstw");
        assert!(results.iter().all(|r| *r == KeyAction::NoMatch));
    }

    #[test]
    fn test_plays_well_with_menu_key_equivalents() {
        let mut m = matcher();
        let results = typed(&mut m, "ghjighi");
        assert_eq!(results[0], KeyAction::Ignore);
        assert_eq!(results[1], KeyAction::Ignore);
        assert_eq!(
            results[2],
            KeyAction::Execute(Action::Seek {
                seconds: -5.0,
                flags: None
            })
        );
        assert_eq!(results[3], KeyAction::Ignore);
        assert_eq!(results[6], scale("1.2"));
    }

    #[test]
    fn test_peek_does_not_record() {
        let m = matcher();
        assert!(m.is_swallowed(Keystroke::char('g')));
        assert!(!m.is_swallowed(Keystroke::char('a')));
        assert!(!m.has_pending());
    }

    #[test]
    fn test_key_was_handled_clears_window() {
        let mut m = matcher();
        typed(&mut m, "gh");
        assert_eq!(m.pending_display().as_deref(), Some("g h"));
        m.key_was_handled();
        assert_eq!(m.pending_display(), None);
        // `i` alone is only an ignore binding now
        assert_eq!(typed(&mut m, "i"), vec![KeyAction::Ignore]);
    }

    #[test]
    fn test_set_table_clears_window() {
        let mut m = matcher();
        typed(&mut m, "gh");
        m.set_table(Arc::new(BindingTable::from_conf_str("i quit\n")));
        assert!(!m.has_pending());
        assert_eq!(typed(&mut m, "i"), vec![KeyAction::Execute(Action::Quit)]);
    }

    #[test]
    fn test_idle_timeout() {
        let start = Instant::now();
        let mut m = matcher().with_idle_timeout(Duration::from_millis(500));
        let g = Keystroke::char('g');
        let h = Keystroke::char('h');
        let i = Keystroke::char('i');

        m.handle_keystroke_at(g, start);
        m.handle_keystroke_at(h, start + Duration::from_millis(100));
        // Long pause: `g-h` is dropped before `i` is recorded
        assert_eq!(
            m.handle_keystroke_at(i, start + Duration::from_secs(2)),
            KeyAction::Ignore
        );
        assert_eq!(m.pending(), vec![i]);
    }

    #[test]
    fn test_no_timeout_by_default() {
        let start = Instant::now();
        let mut m = matcher();
        m.handle_keystroke_at(Keystroke::char('g'), start);
        m.handle_keystroke_at(Keystroke::char('h'), start + Duration::from_secs(60));
        assert_eq!(
            m.handle_keystroke_at(Keystroke::char('i'), start + Duration::from_secs(120)),
            scale("1.2")
        );
    }

    #[test]
    fn test_empty_matcher() {
        let mut m = SequenceMatcher::default();
        assert_eq!(m.handle_keystroke(Keystroke::char('a')), KeyAction::NoMatch);
    }
}

//! Menu key equivalents
//!
//! A menu item shows at most one key. For each slot the first enabled
//! single-keystroke binding (in declaration order) whose action the slot can
//! represent is chosen; later bindings for the same slot are not shown.

use super::action::Action;
use super::table::BindingTable;
use super::types::Keystroke;

/// Which actions a menu slot can represent
#[derive(Debug, Clone, PartialEq)]
pub enum SlotMatch {
    /// `seek <n>` with `min <= n <= max`; the label shows the amount
    SeekRange { min: f64, max: f64 },
    /// `set <property> <n>` with a numerically equal value
    SetNumber { property: String, value: f64 },
    /// Exactly this action
    Exact(Action),
}

impl SlotMatch {
    pub fn accepts(&self, action: &Action) -> bool {
        match (self, action) {
            (SlotMatch::SeekRange { min, max }, Action::Seek { seconds, .. }) => {
                (*min..=*max).contains(seconds)
            }
            (
                SlotMatch::SetNumber { property, value },
                Action::Set {
                    property: p,
                    value: v,
                },
            ) => p == property && v.parse::<f64>().is_ok_and(|v| v == *value),
            (SlotMatch::Exact(expected), action) => expected == action,
            _ => false,
        }
    }
}

/// A menu item that can display a key equivalent
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSlot {
    pub id: String,
    pub title: String,
    pub matcher: SlotMatch,
}

impl MenuSlot {
    pub fn new(id: &str, title: &str, matcher: SlotMatch) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            matcher,
        }
    }

    /// Title for the menu item once `action` is bound to it
    pub fn label_for(&self, action: &Action) -> String {
        match (&self.matcher, action) {
            (SlotMatch::SeekRange { .. }, Action::Seek { seconds, .. }) => {
                format!("{} {}s", self.title, seconds.abs())
            }
            _ => self.title.clone(),
        }
    }
}

/// The key chosen for a menu slot
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEquivalent {
    pub slot: String,
    pub keystroke: Keystroke,
    pub action: Action,
    pub label: String,
}

fn cycle(property: &str) -> SlotMatch {
    SlotMatch::Exact(Action::Cycle {
        property: property.to_string(),
    })
}

fn window_scale(value: f64) -> SlotMatch {
    SlotMatch::SetNumber {
        property: "window-scale".to_string(),
        value,
    }
}

/// The player's standard playback and video menu slots
pub fn default_menu_slots() -> Vec<MenuSlot> {
    vec![
        MenuSlot::new("pause", "Pause", cycle("pause")),
        MenuSlot::new(
            "step-forward",
            "Step Forward",
            SlotMatch::SeekRange {
                min: 5.0,
                max: 60.0,
            },
        ),
        MenuSlot::new(
            "step-backward",
            "Step Backward",
            SlotMatch::SeekRange {
                min: -60.0,
                max: -5.0,
            },
        ),
        MenuSlot::new("half-size", "Half Size", window_scale(0.5)),
        MenuSlot::new("normal-size", "Normal Size", window_scale(1.0)),
        MenuSlot::new("double-size", "Double Size", window_scale(2.0)),
        MenuSlot::new("fullscreen", "Toggle Full Screen", cycle("fullscreen")),
        MenuSlot::new("mute", "Mute", cycle("mute")),
        MenuSlot::new(
            "screenshot",
            "Take a Screenshot",
            SlotMatch::Exact(Action::Mpv {
                name: "screenshot".to_string(),
                args: Vec::new(),
            }),
        ),
        MenuSlot::new("quit", "Quit", SlotMatch::Exact(Action::Quit)),
    ]
}

/// Pick the key equivalent for each slot. Slots with no eligible binding are
/// left out.
pub fn select_menu_equivalents(table: &BindingTable, slots: &[MenuSlot]) -> Vec<MenuEquivalent> {
    slots
        .iter()
        .filter_map(|slot| {
            let binding = table
                .effective_bindings()
                .find(|b| !b.is_chord() && slot.matcher.accepts(&b.action))?;
            tracing::debug!(slot = %slot.id, key = %binding.sequence, "menu key equivalent");
            Some(MenuEquivalent {
                slot: slot.id.clone(),
                keystroke: binding.sequence.first(),
                action: binding.action.clone(),
                label: slot.label_for(&binding.action),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equivalents(conf: &str) -> Vec<MenuEquivalent> {
        select_menu_equivalents(&BindingTable::from_conf_str(conf), &default_menu_slots())
    }

    fn find<'a>(found: &'a [MenuEquivalent], slot: &str) -> Option<&'a MenuEquivalent> {
        found.iter().find(|e| e.slot == slot)
    }

    #[test]
    fn test_first_eligible_binding_is_shown() {
        let found = equivalents(
            "a set window-scale 1.0\n\
             b seek -4\n\
             c seek -5\n\
             e seek -6\n\
             f seek -7\n\
             g seek -7\n\
             \n\
             q seek 2\n\
             r seek 6\n\
             s seek 7\n\
             t seek 9\n\
             u seek 14\n\
             v seek 10\n",
        );

        let back = find(&found, "step-backward").unwrap();
        assert_eq!(back.keystroke, Keystroke::char('c'));
        assert_eq!(back.label, "Step Backward 5s");

        let forward = find(&found, "step-forward").unwrap();
        assert_eq!(forward.keystroke, Keystroke::char('r'));
        assert_eq!(forward.label, "Step Forward 6s");

        assert_eq!(find(&found, "normal-size").unwrap().keystroke, Keystroke::char('a'));
        assert!(find(&found, "double-size").is_none());
    }

    #[test]
    fn test_overridden_bindings_not_shown() {
        let found = equivalents(
            "[ seek -6\n[ seek -7\n[ seek -5\n[ seek -8\n\
             ] seek 9\n] seek 11\n] seek 13\n] seek 15\n] seek 14\n] seek 10\n] seek 12\n",
        );

        assert_eq!(find(&found, "step-backward").unwrap().label, "Step Backward 8s");
        assert_eq!(find(&found, "step-forward").unwrap().label, "Step Forward 12s");
    }

    #[test]
    fn test_sequences_never_shown() {
        let found = equivalents("g-h seek 10\nSPACE cycle pause\n");
        assert!(find(&found, "step-forward").is_none());
        assert_eq!(find(&found, "pause").unwrap().keystroke.to_string(), "SPACE");
    }

    #[test]
    fn test_set_number_compares_numerically() {
        let m = window_scale(2.0);
        assert!(m.accepts(&"set window-scale 2".parse().unwrap()));
        assert!(m.accepts(&"set window-scale 2.000".parse().unwrap()));
        assert!(!m.accepts(&"set window-scale 1.5".parse().unwrap()));
        assert!(!m.accepts(&"set speed 2".parse().unwrap()));
    }
}

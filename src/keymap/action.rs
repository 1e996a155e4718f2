//! Action enum representing the commands a binding can trigger
//!
//! Actions are parsed from the right-hand side of an `input.conf` line. The
//! matcher never looks inside an action; it only distinguishes `Ignore` from
//! everything else.

use std::fmt;
use std::str::FromStr;

use super::error::KeymapError;

/// Prefix marking an extension (player-side, not mpv) command in `input.conf`
pub const EXTENSION_PREFIX: &str = "#@iina";

/// A bound command
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Swallow the key without doing anything
    Ignore,
    /// `seek <seconds> [flags]`
    Seek {
        seconds: f64,
        flags: Option<String>,
    },
    /// `set <property> <value>`
    Set { property: String, value: String },
    /// `add <property> [amount]`
    Add { property: String, amount: f64 },
    /// `cycle <property>`
    Cycle { property: String },
    /// `cycle-values <property> <value>...`
    CycleValues {
        property: String,
        values: Vec<String>,
    },
    /// `show-text <text>`
    ShowText(String),
    /// `quit`
    Quit,
    /// Any other mpv command, kept verbatim
    Mpv { name: String, args: Vec<String> },
    /// A `#@iina` command handled by the player instead of mpv
    Extension { name: String, args: Vec<String> },
}

impl Action {
    /// Parse an extension command (the text after the `#@iina` prefix)
    pub fn extension(text: &str) -> Result<Self, KeymapError> {
        let mut tokens = text.split_whitespace().map(str::to_string);
        let name = tokens
            .next()
            .ok_or_else(|| KeymapError::EmptyAction(text.to_string()))?;
        Ok(Action::Extension {
            name,
            args: tokens.collect(),
        })
    }

    /// Check if this action swallows the key without effect
    pub fn is_ignore(&self) -> bool {
        matches!(self, Action::Ignore)
    }

    /// Check if this is a player-side extension command
    pub fn is_extension(&self) -> bool {
        matches!(self, Action::Extension { .. })
    }

    /// Command name as written in `input.conf`
    pub fn name(&self) -> &str {
        match self {
            Action::Ignore => "ignore",
            Action::Seek { .. } => "seek",
            Action::Set { .. } => "set",
            Action::Add { .. } => "add",
            Action::Cycle { .. } => "cycle",
            Action::CycleValues { .. } => "cycle-values",
            Action::ShowText(_) => "show-text",
            Action::Quit => "quit",
            Action::Mpv { name, .. } | Action::Extension { name, .. } => name,
        }
    }

    /// Human-readable description for menus and the CLI
    pub fn display_name(&self) -> String {
        match self {
            Action::Ignore => "Ignore".to_string(),
            Action::Seek { seconds, .. } if *seconds < 0.0 => {
                format!("Step backward {}s", -seconds)
            }
            Action::Seek { seconds, .. } => format!("Step forward {}s", seconds),
            Action::Set { property, value } => format!("Set {} to {}", property, value),
            Action::Add { property, amount } if *amount < 0.0 => {
                format!("Decrease {} by {}", property, -amount)
            }
            Action::Add { property, amount } => format!("Increase {} by {}", property, amount),
            Action::Cycle { property } => format!("Cycle {}", property),
            Action::CycleValues { property, values } => {
                format!("Cycle {} through {}", property, values.join(", "))
            }
            Action::ShowText(text) => format!("Show text: {}", text),
            Action::Quit => "Quit".to_string(),
            Action::Mpv { .. } | Action::Extension { .. } => self.to_string(),
        }
    }
}

/// Split an explicit `{section}` destination off the front of action text.
///
/// `"{default} screenshot"` gives `(Some("default"), "screenshot")`.
pub fn split_section(text: &str) -> (Option<&str>, &str) {
    let text = text.trim_start();
    if let Some(rest) = text.strip_prefix('{') {
        if let Some((section, action)) = rest.split_once('}') {
            return (Some(section.trim()), action.trim_start());
        }
    }
    (None, text)
}

fn parse_number(text: &str, raw: &str) -> Result<f64, KeymapError> {
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| KeymapError::InvalidAction(format!("Expected a number in: {}", raw)))
}

/// Parse an mpv command such as `seek -5` or `set window-scale 2.0`
impl FromStr for Action {
    type Err = KeymapError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Err(KeymapError::EmptyAction(raw.to_string()));
        };

        let missing = || KeymapError::InvalidAction(format!("Missing arguments: {}", raw));
        let unexpected = || KeymapError::InvalidAction(format!("Unexpected arguments: {}", raw));

        let action = match (name, args) {
            ("ignore", []) => Action::Ignore,
            ("ignore", _) => return Err(unexpected()),
            ("seek", [seconds]) => Action::Seek {
                seconds: parse_number(seconds, raw)?,
                flags: None,
            },
            ("seek", [seconds, flags]) => Action::Seek {
                seconds: parse_number(seconds, raw)?,
                flags: Some(flags.to_string()),
            },
            ("seek", _) => return Err(missing()),
            ("set", [property, value @ ..]) if !value.is_empty() => Action::Set {
                property: property.to_string(),
                value: value.join(" "),
            },
            ("set", _) => return Err(missing()),
            ("add", [property]) => Action::Add {
                property: property.to_string(),
                amount: 1.0,
            },
            ("add", [property, amount]) => Action::Add {
                property: property.to_string(),
                amount: parse_number(amount, raw)?,
            },
            ("add", _) => return Err(missing()),
            ("cycle", [property]) => Action::Cycle {
                property: property.to_string(),
            },
            ("cycle-values", [property, values @ ..]) if !values.is_empty() => {
                Action::CycleValues {
                    property: property.to_string(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                }
            }
            ("cycle-values", _) => return Err(missing()),
            ("show-text", text) if !text.is_empty() => Action::ShowText(text.join(" ")),
            ("show-text", _) => return Err(missing()),
            ("quit", []) => Action::Quit,
            _ => Action::Mpv {
                name: name.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
            },
        };
        Ok(action)
    }
}

/// Single-spaced `input.conf` form (extension commands without their prefix)
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Ignore | Action::Quit => write!(f, "{}", self.name()),
            Action::Seek { seconds, flags } => {
                write!(f, "seek {}", seconds)?;
                if let Some(flags) = flags {
                    write!(f, " {}", flags)?;
                }
                Ok(())
            }
            Action::Set { property, value } => write!(f, "set {} {}", property, value),
            Action::Add { property, amount } => write!(f, "add {} {}", property, amount),
            Action::Cycle { property } => write!(f, "cycle {}", property),
            Action::CycleValues { property, values } => {
                write!(f, "cycle-values {} {}", property, values.join(" "))
            }
            Action::ShowText(text) => write!(f, "show-text {}", text),
            Action::Mpv { name, args } | Action::Extension { name, args } => {
                write!(f, "{}", name)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

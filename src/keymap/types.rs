//! Core types for the keymap system: Keystroke, Modifiers, KeyCode
//!
//! Keystrokes are always stored in canonical form. The shift modifier on a
//! character key is folded into the character itself, so `Shift+b`, `Shift+B`
//! and `B` are the same value, as are `Shift+1` and `!`.

use std::fmt;
use std::str::FromStr;

use super::error::KeymapError;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0b0001);
    pub const CTRL: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Remove the modifiers in `other`
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }

    /// Parse a single modifier name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Modifiers> {
        match name.to_ascii_lowercase().as_str() {
            "shift" => Some(Modifiers::SHIFT),
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "alt" | "option" | "opt" => Some(Modifiers::ALT),
            "meta" | "cmd" | "command" => Some(Modifiers::META),
            _ => None,
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// mpv order: `Shift+Ctrl+Alt+Meta`
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.shift() {
            parts.push("Shift");
        }
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key code using mpv's key-name vocabulary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A printable character key, case-sensitive
    Char(char),

    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Insert,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
    PageUp,
    PageDown,

    /// F1-F24
    F(u8),

    /// KP0-KP9
    Kp(u8),
    KpDec,
    KpEnter,

    Power,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    Mute,
    VolumeUp,
    VolumeDown,
}

impl KeyCode {
    /// Parse an mpv key name. Single characters are taken literally,
    /// longer names are matched case-insensitively.
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(if c == ' ' {
                KeyCode::Space
            } else {
                KeyCode::Char(c)
            });
        }

        let upper = name.to_ascii_uppercase();
        let key = match upper.as_str() {
            "ENTER" | "RETURN" => KeyCode::Enter,
            "ESC" | "ESCAPE" => KeyCode::Esc,
            "TAB" => KeyCode::Tab,
            "BS" | "BACKSPACE" => KeyCode::Backspace,
            "DEL" | "DELETE" => KeyCode::Delete,
            "INS" | "INSERT" => KeyCode::Insert,
            "SPACE" => KeyCode::Space,
            "SHARP" => KeyCode::Char('#'),
            "PLUS" => KeyCode::Char('+'),
            "MINUS" => KeyCode::Char('-'),

            "UP" => KeyCode::Up,
            "DOWN" => KeyCode::Down,
            "LEFT" => KeyCode::Left,
            "RIGHT" => KeyCode::Right,

            "HOME" => KeyCode::Home,
            "END" => KeyCode::End,
            "PGUP" | "PAGEUP" => KeyCode::PageUp,
            "PGDWN" | "PGDN" | "PAGEDOWN" => KeyCode::PageDown,

            "KP_DEC" => KeyCode::KpDec,
            "KP_ENTER" => KeyCode::KpEnter,

            "POWER" => KeyCode::Power,
            "PLAY" => KeyCode::Play,
            "PAUSE" => KeyCode::Pause,
            "PLAYPAUSE" => KeyCode::PlayPause,
            "STOP" => KeyCode::Stop,
            "NEXT" => KeyCode::Next,
            "PREV" => KeyCode::Prev,
            "MUTE" => KeyCode::Mute,
            "VOLUME_UP" => KeyCode::VolumeUp,
            "VOLUME_DOWN" => KeyCode::VolumeDown,

            _ => return Self::numbered(&upper),
        };
        Some(key)
    }

    /// `F1`..`F24`, `KP0`..`KP9`
    fn numbered(upper: &str) -> Option<KeyCode> {
        let (is_keypad, digits) = if let Some(d) = upper.strip_prefix("KP") {
            (true, d)
        } else if let Some(d) = upper.strip_prefix('F') {
            (false, d)
        } else {
            return None;
        };

        let well_formed = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !(digits.len() > 1 && digits.starts_with('0'));
        if !well_formed {
            return None;
        }

        let n: u8 = digits.parse().ok()?;
        match is_keypad {
            true if n <= 9 => Some(KeyCode::Kp(n)),
            false if (1..=24).contains(&n) => Some(KeyCode::F(n)),
            _ => None,
        }
    }

    /// Shifted form of a character on a US layout, if it has one
    pub fn shifted_char(c: char) -> Option<char> {
        let shifted = match c {
            '1' => '!',
            '2' => '@',
            '3' => '#',
            '4' => '$',
            '5' => '%',
            '6' => '^',
            '7' => '&',
            '8' => '*',
            '9' => '(',
            '0' => ')',
            '-' => '_',
            '=' => '+',
            '[' => '{',
            ']' => '}',
            '\\' => '|',
            ';' => ':',
            '\'' => '"',
            ',' => '<',
            '.' => '>',
            '/' => '?',
            '`' => '~',
            c if c.is_lowercase() => {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) => u,
                    _ => return None,
                }
            }
            _ => return None,
        };
        Some(shifted)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char('#') => write!(f, "SHARP"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "ENTER"),
            KeyCode::Esc => write!(f, "ESC"),
            KeyCode::Tab => write!(f, "TAB"),
            KeyCode::Backspace => write!(f, "BS"),
            KeyCode::Delete => write!(f, "DEL"),
            KeyCode::Insert => write!(f, "INS"),
            KeyCode::Space => write!(f, "SPACE"),
            KeyCode::Up => write!(f, "UP"),
            KeyCode::Down => write!(f, "DOWN"),
            KeyCode::Left => write!(f, "LEFT"),
            KeyCode::Right => write!(f, "RIGHT"),
            KeyCode::Home => write!(f, "HOME"),
            KeyCode::End => write!(f, "END"),
            KeyCode::PageUp => write!(f, "PGUP"),
            KeyCode::PageDown => write!(f, "PGDWN"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Kp(n) => write!(f, "KP{}", n),
            KeyCode::KpDec => write!(f, "KP_DEC"),
            KeyCode::KpEnter => write!(f, "KP_ENTER"),
            KeyCode::Power => write!(f, "POWER"),
            KeyCode::Play => write!(f, "PLAY"),
            KeyCode::Pause => write!(f, "PAUSE"),
            KeyCode::PlayPause => write!(f, "PLAYPAUSE"),
            KeyCode::Stop => write!(f, "STOP"),
            KeyCode::Next => write!(f, "NEXT"),
            KeyCode::Prev => write!(f, "PREV"),
            KeyCode::Mute => write!(f, "MUTE"),
            KeyCode::VolumeUp => write!(f, "VOLUME_UP"),
            KeyCode::VolumeDown => write!(f, "VOLUME_DOWN"),
        }
    }
}

/// A single keystroke: a key with modifiers, in canonical form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keystroke {
    key: KeyCode,
    mods: Modifiers,
}

impl Keystroke {
    /// Create a keystroke, folding shift into character keys
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        match key {
            KeyCode::Char(c) if mods.shift() => Self {
                key: KeyCode::Char(KeyCode::shifted_char(c).unwrap_or(c)),
                mods: mods.without(Modifiers::SHIFT),
            },
            _ => Self { key, mods },
        }
    }

    /// Create a keystroke with no modifiers
    pub fn plain(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Create a keystroke for a character key
    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Create a keystroke with a character and modifiers
    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c), mods)
    }

    /// Build a keystroke from a key event as reported by the platform layer:
    /// the key's mpv name plus the modifier flags held at the time.
    pub fn from_event(key_name: &str, mods: Modifiers) -> Result<Self, KeymapError> {
        let key = KeyCode::from_name(key_name)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key_name)))?;
        Ok(Self::new(key, mods))
    }

    #[inline]
    pub fn key(&self) -> KeyCode {
        self.key
    }

    #[inline]
    pub fn mods(&self) -> Modifiers {
        self.mods
    }

    /// Display the keystroke using platform-specific symbols
    pub fn display_string(&self) -> String {
        let mut parts = Vec::new();

        if cfg!(target_os = "macos") {
            // macOS uses symbols: ⌃ ⌥ ⇧ ⌘
            if self.mods.ctrl() {
                parts.push("⌃");
            }
            if self.mods.alt() {
                parts.push("⌥");
            }
            if self.mods.shift() {
                parts.push("⇧");
            }
            if self.mods.meta() {
                parts.push("⌘");
            }
        } else {
            if self.mods.ctrl() {
                parts.push("Ctrl+");
            }
            if self.mods.alt() {
                parts.push("Alt+");
            }
            if self.mods.shift() {
                parts.push("Shift+");
            }
            if self.mods.meta() {
                parts.push("Meta+");
            }
        }

        let key_str = match self.key {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Space => "Space".to_string(),
            _ => self.key.to_string(),
        };

        format!("{}{}", parts.join(""), key_str)
    }
}

/// Canonical mpv form, e.g. `Ctrl+Alt+t`, `Shift+ENTER`, `B`
impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

/// Parse one keystroke token such as `Ctrl+T`, `Shift+f`, `Ctrl++` or `-`
impl FromStr for Keystroke {
    type Err = KeymapError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(KeymapError::InvalidKey("Empty keystroke".to_string()));
        }

        let mut mods = Modifiers::NONE;
        let mut rest = token;

        // Every `+` with text on both sides ends a modifier name
        while let Some(idx) = rest.find('+') {
            if idx == 0 || idx + 1 >= rest.len() {
                break;
            }
            let name = &rest[..idx];
            let modifier = Modifiers::from_name(name).ok_or_else(|| {
                KeymapError::InvalidKey(format!("Unknown modifier '{}' in: {}", name, token))
            })?;
            mods = mods | modifier;
            rest = &rest[idx + 1..];
        }

        let key = KeyCode::from_name(rest)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", token)))?;

        Ok(Keystroke::new(key, mods))
    }
}

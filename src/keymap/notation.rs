//! Keystroke notation lexer
//!
//! Splits an `input.conf` key descriptor such as `Ctrl+T-L` or `d-d-e` into
//! keystroke tokens. The `-` character is both the sequence separator and the
//! name of the minus key, so the lexer tracks three states:
//!
//! - `ExpectToken`: at the start of a keystroke. A `-` here is the minus key.
//! - `InToken`: inside a keystroke. A `-` ends it, unless it directly follows a
//!   modifier `+` (`Ctrl+-`) or is the last character of the input.
//! - `DashRun`: a minus key was just read. Only a separator (or the end of
//!   input) may follow; anything else makes the descriptor malformed.
//!
//! A malformed descriptor is returned unsplit as a single token. At most
//! [`MAX_SEQUENCE_LEN`] tokens are produced; the rest of the input is dropped.

use super::sequence::MAX_SEQUENCE_LEN;

/// Result of splitting a descriptor, with the signals callers need to
/// reject it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokeSplit {
    pub tokens: Vec<String>,
    /// More keystrokes followed the last returned token
    pub truncated: bool,
    /// The descriptor did not follow the key/separator grammar
    pub malformed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectToken,
    InToken,
    DashRun,
}

/// Split a key descriptor into at most four keystroke tokens.
///
/// Never fails: malformed input comes back as a single token equal to `raw`.
pub fn split_keystrokes(raw: &str) -> Vec<String> {
    split_keystrokes_checked(raw).tokens
}

/// Like [`split_keystrokes`], but reports truncation and malformed input
pub fn split_keystrokes_checked(raw: &str) -> KeystrokeSplit {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut state = State::ExpectToken;
    let mut truncated = false;

    let malformed = || KeystrokeSplit {
        tokens: vec![raw.to_string()],
        truncated: false,
        malformed: true,
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let is_last = i + 1 == chars.len();

        match state {
            State::ExpectToken => {
                if tokens.len() == MAX_SEQUENCE_LEN {
                    truncated = true;
                    break;
                }
                if c == '-' {
                    tokens.push("-".to_string());
                    state = State::DashRun;
                } else {
                    current.push(c);
                    state = State::InToken;
                }
            }
            State::InToken => {
                if c != '-' {
                    current.push(c);
                } else if ends_with_modifier(&current) || is_last {
                    // `Ctrl+-`, or a trailing dash that mpv keeps in the name
                    current.push(c);
                    tokens.push(std::mem::take(&mut current));
                    state = State::DashRun;
                } else {
                    tokens.push(std::mem::take(&mut current));
                    state = State::ExpectToken;
                }
            }
            State::DashRun => {
                if c != '-' {
                    return malformed();
                }
                if is_last {
                    // Dangling separator after a minus key: discarded
                    break;
                }
                state = State::ExpectToken;
            }
        }
        i += 1;
    }

    match state {
        State::InToken => tokens.push(current),
        State::ExpectToken if tokens.is_empty() => return malformed(),
        _ => {}
    }

    tracing::trace!(raw, ?tokens, truncated, "split keystrokes");

    KeystrokeSplit {
        tokens,
        truncated,
        malformed: false,
    }
}

/// True if the token so far is `<modifier>+`, so a following `-` is the key
fn ends_with_modifier(token: &str) -> bool {
    let mut rev = token.chars().rev();
    matches!((rev.next(), rev.next()), (Some('+'), Some(prev)) if prev != '+')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashes(n: usize) -> String {
        "-".repeat(n)
    }

    #[test]
    fn test_one_happy_path() {
        assert_eq!(split_keystrokes("T"), vec!["T"]);
    }

    #[test]
    fn test_two_happy_path() {
        assert_eq!(split_keystrokes("Ctrl+T-L"), vec!["Ctrl+T", "L"]);
    }

    #[test]
    fn test_dashes_happy_path() {
        assert_eq!(split_keystrokes("Test-1-2-3"), vec!["Test", "1", "2", "3"]);
    }

    #[test]
    fn test_dash_runs() {
        // Second dash is the separator
        assert_eq!(split_keystrokes(&dashes(3)), vec!["-", "-"]);
        // Fourth dash is extraneous
        assert_eq!(split_keystrokes(&dashes(4)), vec!["-", "-"]);
        // Maximum: four minus keys joined by three separators
        assert_eq!(split_keystrokes(&dashes(7)), vec!["-"; 4]);
        assert_eq!(split_keystrokes(&dashes(8)), vec!["-"; 4]);
        assert_eq!(split_keystrokes(&dashes(9)), vec!["-"; 4]);
    }

    #[test]
    fn test_short_dash_runs() {
        assert_eq!(split_keystrokes("-"), vec!["-"]);
        assert_eq!(split_keystrokes("--"), vec!["-"]);
        assert_eq!(split_keystrokes("-----"), vec!["-", "-", "-"]);
    }

    #[test]
    fn test_malformed_returns_input() {
        let split = split_keystrokes_checked("-+-----");
        assert!(split.malformed);
        assert_eq!(split.tokens, vec!["-+-----"]);

        assert_eq!(split_keystrokes("-a"), vec!["-a"]);
        assert_eq!(split_keystrokes("a--b"), vec!["a--b"]);
        assert_eq!(split_keystrokes(""), vec![""]);
    }

    #[test]
    fn test_minus_key_inside_sequence() {
        assert_eq!(split_keystrokes("a---b"), vec!["a", "-", "b"]);
        assert_eq!(split_keystrokes("--a"), vec!["-", "a"]);
        assert_eq!(split_keystrokes("a--"), vec!["a", "-"]);
    }

    #[test]
    fn test_modifier_minus() {
        assert_eq!(split_keystrokes("Ctrl+-"), vec!["Ctrl+-"]);
        assert_eq!(split_keystrokes("Ctrl+--a"), vec!["Ctrl+-", "a"]);
        assert_eq!(split_keystrokes("Ctrl++-a"), vec!["Ctrl++", "a"]);
        assert_eq!(split_keystrokes("+-a"), vec!["+", "a"]);
    }

    #[test]
    fn test_trailing_dash_stays_in_token() {
        assert_eq!(split_keystrokes("a-"), vec!["a-"]);
    }

    #[test]
    fn test_truncation_is_reported() {
        let split = split_keystrokes_checked("q-r-s-t-w");
        assert_eq!(split.tokens, vec!["q", "r", "s", "t"]);
        assert!(split.truncated);

        let split = split_keystrokes_checked("k-l-m-n");
        assert!(!split.truncated);
        assert!(!split_keystrokes_checked(&dashes(8)).truncated);
    }

    #[test]
    fn test_rejoin_reconstructs_well_formed_input() {
        for raw in ["T", "Ctrl+T-L", "Test-1-2-3", "Shift+a-b", "a-", "d-d-d-e", "Alt+ENTER"] {
            assert_eq!(split_keystrokes(raw).join("-"), raw, "input: {}", raw);
        }
    }
}

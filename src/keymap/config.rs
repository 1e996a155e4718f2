//! `input.conf` reader
//!
//! Turns the text of an mpv-style `input.conf` into [`ConfLine`]s in
//! declaration order. Interpreting the key and action text is left to the
//! binding table so that bad lines become diagnostics instead of errors.

use std::path::Path;

use super::action::EXTENSION_PREFIX;
use super::error::KeymapError;

/// One binding line from an `input.conf`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfLine {
    /// 1-based line number in the source text
    pub line: usize,
    /// Key descriptor, e.g. `Ctrl+x-Ctrl+s`
    pub key: String,
    /// Action text, e.g. `seek -5 exact`
    pub action: String,
    /// Line carried the `#@iina` prefix
    pub is_extension: bool,
    /// Text after the first `#`, if any
    pub comment: Option<String>,
}

/// Parse a single line. Returns `None` for blank lines, comments and lines
/// without an action.
pub fn parse_conf_line(line_number: usize, raw: &str) -> Option<ConfLine> {
    let mut content = raw.trim();
    if content.is_empty() {
        return None;
    }

    let mut is_extension = false;
    if content.starts_with('#') {
        content = content.strip_prefix(EXTENSION_PREFIX)?.trim();
        is_extension = true;
    }

    let mut comment = None;
    if let Some((before, after)) = content.split_once('#') {
        comment = Some(after.to_string());
        content = before;
    }

    let (key, action) = content.split_once(|c: char| c == ' ' || c == '\t')?;
    let action = action.trim();
    if key.is_empty() || action.is_empty() {
        return None;
    }

    Some(ConfLine {
        line: line_number,
        key: key.to_string(),
        action: action.to_string(),
        is_extension,
        comment,
    })
}

/// Parse every binding line of an `input.conf`
pub fn parse_input_conf(text: &str) -> Vec<ConfLine> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| parse_conf_line(idx + 1, raw))
        .collect()
}

/// Load binding lines from an `input.conf` file
pub fn load_input_conf(path: &Path) -> Result<Vec<ConfLine>, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::Io(format!("{}: {}", path.display(), e)))?;

    let lines = parse_input_conf(&content);
    tracing::debug!(path = %path.display(), lines = lines.len(), "read input.conf");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> Option<ConfLine> {
        parse_conf_line(1, raw)
    }

    #[test]
    fn test_parse_simple_line() {
        let l = line("SPACE cycle pause").unwrap();
        assert_eq!(l.key, "SPACE");
        assert_eq!(l.action, "cycle pause");
        assert!(!l.is_extension);
        assert_eq!(l.comment, None);
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        assert_eq!(line(""), None);
        assert_eq!(line("   \t "), None);
        assert_eq!(line("# seek 5"), None);
        assert_eq!(line("#RIGHT seek 5"), None);
    }

    #[test]
    fn test_line_without_action_skipped() {
        assert_eq!(line("RIGHT"), None);
        assert_eq!(line("RIGHT    # nothing bound"), None);
    }

    #[test]
    fn test_trailing_comment_split_off() {
        let l = line("RIGHT seek  5 # forward").unwrap();
        assert_eq!(l.action, "seek  5");
        assert_eq!(l.comment.as_deref(), Some(" forward"));
    }

    #[test]
    fn test_tab_separator_and_indent() {
        let l = line("  Ctrl+q\tquit").unwrap();
        assert_eq!(l.key, "Ctrl+q");
        assert_eq!(l.action, "quit");
    }

    #[test]
    fn test_extension_line() {
        let l = line("#@iina Meta+p toggle-flag pip").unwrap();
        assert!(l.is_extension);
        assert_eq!(l.key, "Meta+p");
        assert_eq!(l.action, "toggle-flag pip");
    }

    #[test]
    fn test_line_numbers_follow_source() {
        let text = "# header\n\na seek 5\n\nb seek -5\n";
        let lines = parse_input_conf(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 3);
        assert_eq!(lines[1].line, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_input_conf(Path::new("/nonexistent/input.conf")).unwrap_err();
        assert!(matches!(err, KeymapError::Io(_)));
    }
}

//! Where keyseq keeps its files
//!
//! Everything lives under one root directory:
//! - `config.yaml` for [`Settings`](crate::config::Settings)
//! - `input.conf` for the user's bindings
//! - `logs/` for the daily-rotated log files
//!
//! The root is `$XDG_CONFIG_HOME/keyseq`, falling back to `~/.config/keyseq`
//! (`%APPDATA%\keyseq` on Windows).

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "keyseq";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "keyseq.log";

/// File layout rooted at a keyseq config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    /// Use `root` as the config directory as-is
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the config directory from the process environment
    pub fn discover() -> Option<Self> {
        Self::from_env(|key| std::env::var_os(key))
    }

    /// Resolve the config directory using `var` to read environment variables
    pub fn from_env(var: impl Fn(&str) -> Option<OsString>) -> Option<Self> {
        let base = if cfg!(target_os = "windows") {
            var("APPDATA").map(PathBuf::from)
        } else {
            var("XDG_CONFIG_HOME")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        }?;
        Some(Self::at(base.join(APP_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    pub fn input_conf(&self) -> PathBuf {
        self.root.join("input.conf")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create `logs/` (and the root) if missing, returning it
    pub fn ensure_logs_dir(&self) -> io::Result<PathBuf> {
        let logs = self.logs_dir();
        std::fs::create_dir_all(&logs)?;
        Ok(logs)
    }
}

/// The config directory of the current user
pub fn config_dir() -> Option<PathBuf> {
    ConfigPaths::discover().map(|paths| paths.root)
}

/// `config.yaml` of the current user
pub fn config_file() -> Option<PathBuf> {
    ConfigPaths::discover().map(|paths| paths.config_file())
}

/// `input.conf` of the current user
pub fn input_conf_file() -> Option<PathBuf> {
    ConfigPaths::discover().map(|paths| paths.input_conf())
}

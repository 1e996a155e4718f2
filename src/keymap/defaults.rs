//! Default key bindings
//!
//! The embedded `input.conf` ships with the binary. The user's own file is
//! declared after it, so last-one-wins lets any user line override a default.

use std::path::Path;

use super::binding::BindingOrigin;
use super::config::{load_input_conf, parse_input_conf, ConfLine};
use super::table::BindingTable;

/// Default input.conf embedded at compile time
pub const DEFAULT_INPUT_CONF: &str = include_str!("../../input.conf");

/// Binding lines of the embedded defaults
pub fn default_conf_lines() -> Vec<ConfLine> {
    parse_input_conf(DEFAULT_INPUT_CONF)
}

/// Table built from the embedded defaults only
pub fn default_table() -> BindingTable {
    let mut builder = BindingTable::builder();
    builder.push_conf_lines(BindingOrigin::Default, &default_conf_lines());
    builder.build()
}

/// Load and layer bindings: embedded defaults, then the user's input.conf
///
/// A missing user file is not an error. An unreadable one is logged and
/// skipped, leaving the defaults in place.
pub fn load_bindings(user_path: Option<&Path>) -> BindingTable {
    let defaults = default_conf_lines();
    tracing::info!("Loaded embedded default input.conf ({} lines)", defaults.len());

    let mut builder = BindingTable::builder();
    builder.push_conf_lines(BindingOrigin::Default, &defaults);

    if let Some(path) = user_path {
        if path.exists() {
            match load_input_conf(path) {
                Ok(lines) => {
                    tracing::info!(
                        "Layering user input.conf from {} ({} lines)",
                        path.display(),
                        lines.len()
                    );
                    builder.push_conf_lines(BindingOrigin::User, &lines);
                }
                Err(e) => {
                    tracing::warn!("Failed to load user input.conf: {}", e);
                }
            }
        } else {
            tracing::debug!("No user input.conf at {}", path.display());
        }
    }

    builder.build()
}

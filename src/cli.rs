//! Command-line interface
//!
//! Supports:
//! - Checking an input.conf and listing the effective bindings
//! - Replaying keystrokes through a matcher
//! - Showing the key chosen for each menu item

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::Settings;
use crate::keymap::{
    default_menu_slots, select_menu_equivalents, BindingTable, KeyAction, KeySequence,
    SequenceMatcher,
};

/// Inspect and exercise mpv-style key bindings
#[derive(Parser, Debug)]
#[command(name = "keyseq", version, about = "Inspect and exercise mpv-style key bindings")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Load the bindings and print diagnostics and the effective table
    Check {
        #[command(flatten)]
        config: ConfigArgs,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Feed keystrokes through a matcher and print the outcome of each
    Replay {
        #[command(flatten)]
        config: ConfigArgs,

        /// Keystrokes or sequences, e.g. `d d e` or `Ctrl+x-Ctrl+s`
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
    },
    /// Print the key equivalent chosen for each menu item
    Menu {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConfigArgs {
    /// input.conf to layer over the defaults (instead of the user's)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore the embedded defaults and load only the given file
    #[arg(long)]
    pub no_defaults: bool,
}

impl CliCommand {
    pub fn config(&self) -> &ConfigArgs {
        match self {
            CliCommand::Check { config, .. }
            | CliCommand::Replay { config, .. }
            | CliCommand::Menu { config } => config,
        }
    }
}

/// Build the binding table the command asked for
pub fn load_table(args: &ConfigArgs, settings: &Settings) -> Result<BindingTable> {
    if let Some(path) = &args.config {
        anyhow::ensure!(path.exists(), "input.conf not found: {}", path.display());
    }

    if args.no_defaults {
        let path = args
            .config
            .clone()
            .or_else(|| settings.input_conf_path())
            .context("No input.conf given and no config directory available")?;
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(BindingTable::from_conf_str(&text));
    }

    let user_path = args.config.clone().or_else(|| settings.input_conf_path());
    Ok(crate::keymap::load_bindings(user_path.as_deref()))
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    bindings: Vec<BindingReport<'a>>,
    diagnostics: Vec<DiagnosticReport<'a>>,
}

#[derive(Debug, Serialize)]
struct BindingReport<'a> {
    key: String,
    action: String,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DiagnosticReport<'a> {
    line: usize,
    key: &'a str,
    message: &'a str,
}

/// Render the `check` report
pub fn check_report(table: &BindingTable, json: bool) -> Result<String> {
    if json {
        let report = CheckReport {
            bindings: table
                .entries()
                .iter()
                .map(|e| BindingReport {
                    key: e.binding.sequence.to_string(),
                    action: e.binding.action.to_string(),
                    enabled: e.enabled,
                    message: e.message.as_deref(),
                })
                .collect(),
            diagnostics: table
                .diagnostics()
                .iter()
                .map(|d| DiagnosticReport {
                    line: d.line,
                    key: &d.key,
                    message: &d.message,
                })
                .collect(),
        };
        return serde_json::to_string_pretty(&report).context("Failed to serialize report");
    }

    let mut out = String::new();
    for d in table.diagnostics() {
        writeln!(out, "warning: {}", d)?;
    }
    for b in table.effective_bindings() {
        writeln!(out, "{}", b.conf_line())?;
    }
    writeln!(
        out,
        "{} bindings, {} diagnostics",
        table.effective_bindings().count(),
        table.diagnostics().len()
    )?;
    Ok(out)
}

/// Render the `replay` report, one line per keystroke
pub fn replay_report(table: BindingTable, settings: &Settings, keys: &[String]) -> Result<String> {
    let mut matcher = SequenceMatcher::new(Arc::new(table)).with_order(settings.match_order);
    if let Some(timeout) = settings.idle_timeout() {
        matcher = matcher.with_idle_timeout(timeout);
    }

    let mut out = String::new();
    for arg in keys {
        let sequence = KeySequence::parse(arg)
            .with_context(|| format!("Invalid keystroke: {}", arg))?;
        for &keystroke in sequence.keystrokes() {
            let outcome = match matcher.handle_keystroke(keystroke) {
                KeyAction::Execute(action) => format!("execute {}", action),
                KeyAction::Ignore => match matcher.pending_display() {
                    Some(pending) => format!("ignore (pending: {})", pending),
                    None => "ignore".to_string(),
                },
                KeyAction::NoMatch => "no match".to_string(),
            };
            writeln!(out, "{:<12} {}", keystroke.to_string(), outcome)?;
        }
    }
    Ok(out)
}

/// Render the `menu` report
pub fn menu_report(table: &BindingTable) -> Result<String> {
    let mut out = String::new();
    for equivalent in select_menu_equivalents(table, &default_menu_slots()) {
        writeln!(
            out,
            "{:<24} {:<12} {}",
            equivalent.label,
            equivalent.keystroke.to_string(),
            equivalent.action
        )?;
    }
    Ok(out)
}

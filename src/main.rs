use anyhow::Result;
use clap::Parser;

use keyseq::cli::{self, CliArgs, CliCommand};
use keyseq::Settings;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    keyseq::tracing::init();

    let settings = Settings::load();
    let table = cli::load_table(args.command.config(), &settings)?;

    let output = match &args.command {
        CliCommand::Check { json, .. } => cli::check_report(&table, *json)?,
        CliCommand::Replay { keys, .. } => cli::replay_report(table, &settings, keys)?,
        CliCommand::Menu { .. } => cli::menu_report(&table)?,
    };
    print!("{}", output);

    Ok(())
}

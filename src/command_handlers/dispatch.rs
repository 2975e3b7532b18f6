use crate::cli::Commands;
use crate::command_handlers::{catalog, install, search};
use crate::config::Settings;
use anyhow::Result;

/// Runs one subcommand and returns the process exit code.
pub fn dispatch(cmd: Commands, settings: &Settings) -> Result<i32> {
    match cmd {
        Commands::SearchUnix { name } => search::search_unix(&name, settings).map(|_| 0),
        Commands::SearchModern { name } => search::search_modern(&name, settings).map(|_| 0),
        Commands::Install { name } => install::install_one(&name, settings).map(|_| 0),
        Commands::InstallAll => install::install_all(settings),
        Commands::Table { output } => catalog::write_table(&output, settings).map(|_| 0),
        Commands::Validate => catalog::validate(settings),
    }
}

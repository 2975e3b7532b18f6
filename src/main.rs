mod catalog;
mod cli;
mod command_handlers;
mod config;
mod error;
mod extract;
mod installer;
mod locate;
mod platform;
mod release;
mod resolver;
mod table;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::{FileConfig, Settings};

pub const USER_AGENT: &str = concat!("modern/", env!("CARGO_PKG_VERSION"));

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = settings(&cli)?;
    let code = command_handlers::dispatch::dispatch(cli.command, &settings)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "modern=info",
        1 => "modern=debug",
        _ => "modern=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("MODERN_LOG").unwrap_or_else(|_| level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Defaults, then the config file, then command-line flags and environment.
fn settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::default();
    let path = match &cli.config {
        Some(p) if !p.exists() => bail!("config file {} does not exist", p.display()),
        Some(p) => Some(p.clone()),
        None => FileConfig::default_path(),
    };
    if let Some(path) = path {
        if let Some(file) = FileConfig::load(&path)? {
            settings = settings.with_file_config(file);
        }
    }
    settings.dry_run = cli.dry_run;
    if cli.catalog.is_some() {
        settings.catalog_path = cli.catalog.clone();
    }
    settings.github_token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
    Ok(settings)
}

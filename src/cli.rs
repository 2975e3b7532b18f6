use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "modern",
    about = "Install prebuilt modern replacements of legacy Unix tools and alias them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). MODERN_LOG overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Tool catalog JSON file (defaults to ./info.json when present, else the remote catalog)
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to config (defaults to ~/.config/modern/config.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Resolve and download, but do not install binaries or write aliases
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the catalog entries replacing a legacy Unix tool
    SearchUnix {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Show the catalog entries for a modern tool
    SearchModern {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Install one modern tool by name and alias its legacy counterpart.
    /// Examples:
    ///   modern install bat
    ///   modern --dry-run install ripgrep
    Install {
        #[arg(value_name = "MODERN_NAME")]
        name: String,
    },
    /// Install every catalog tool that has a prebuild for this host.
    /// Exit code is the number of failed installs.
    InstallAll,
    /// Write the catalog as a Markdown table
    Table {
        #[arg(short, long, value_name = "PATH", default_value = "README.md")]
        output: PathBuf,
    },
    /// Report ambiguous names in the catalog
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["modern", "install", "bat", "-vv", "--dry-run"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.dry_run);
        assert!(matches!(cli.command, Commands::Install { ref name } if name == "bat"));
    }

    #[test]
    fn table_output_defaults_to_readme() {
        let cli = Cli::try_parse_from(["modern", "table"]).unwrap();
        match cli.command {
            Commands::Table { output } => assert_eq!(output, PathBuf::from("README.md")),
            other => panic!("unexpected {other:?}"),
        }
    }
}

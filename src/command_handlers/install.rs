use crate::command_handlers::catalog::{exit_code, load_catalog};
use crate::config::Settings;
use crate::installer;
use crate::platform::PlatformFingerprint;
use crate::release::GitHubClient;
use anyhow::{Context, Result};

pub fn install_one(name: &str, settings: &Settings) -> Result<()> {
    let catalog = load_catalog(settings)?;
    let tool = catalog.find_modern(name)?;
    let fp = PlatformFingerprint::detect()?;
    let source = GitHubClient::new(settings)?;
    let outcome = installer::install_tool(tool, &source, &fp, settings)
        .with_context(|| format!("installing {name} for {fp}"))?;

    let prefix = if settings.dry_run { "[dry-run] " } else { "" };
    println!("{prefix}Installed {} -> {}", tool.modern_name, outcome.binary.display());
    if outcome.alias_added {
        println!(
            "Alias for '{}' written to {}; source it from your shell profile",
            tool.legacy_name,
            outcome.alias_file.display()
        );
    }
    Ok(())
}

/// Exit code is the number of failed installs; skipped tools do not count.
pub fn install_all(settings: &Settings) -> Result<i32> {
    let catalog = load_catalog(settings)?;
    let fp = PlatformFingerprint::detect()?;
    let source = GitHubClient::new(settings)?;
    let summary = installer::install_all(&catalog, &source, &fp, settings);

    println!(
        "{} installed, {} skipped, {} failed",
        summary.installed,
        summary.skipped,
        summary.failed()
    );
    for (name, reason) in &summary.failures {
        eprintln!("  {name}: {reason}");
    }
    Ok(exit_code(summary.failed()))
}

use crate::catalog::{Catalog, ToolRecord};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::locate::locate;
use crate::platform::{platform, PlatformFingerprint};
use crate::release::ReleaseSource;
use crate::resolver::{ensure_prebuild, resolve};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Where the binary was (or, in dry-run, would be) installed.
    pub binary: PathBuf,
    pub alias_file: PathBuf,
    pub alias_line: String,
    pub alias_added: bool,
}

#[derive(Debug, Default)]
pub struct InstallSummary {
    pub installed: usize,
    pub skipped: usize,
    pub failures: Vec<(String, String)>,
}

impl InstallSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Install directory: the configured one (created if needed), else the
/// first existing platform candidate.
pub fn output_directory(settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = &settings.install_dir {
        fs::create_dir_all(dir)?;
        return Ok(dir.clone());
    }
    let candidates = platform().bin_dir_candidates();
    first_existing_dir(&candidates).ok_or_else(|| Error::NoWritableDirectory {
        tried: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn first_existing_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|c| c.is_dir()).cloned()
}

fn alias_file(settings: &Settings) -> Result<PathBuf> {
    settings
        .alias_file
        .clone()
        .or_else(|| platform().alias_file())
        .ok_or_else(|| Error::Config("cannot determine alias file (no home directory)".into()))
}

/// Downloads, extracts and installs one tool, then records its alias.
pub fn install_tool(
    tool: &ToolRecord,
    source: &dyn ReleaseSource,
    fp: &PlatformFingerprint,
    settings: &Settings,
) -> Result<InstallOutcome> {
    // No network access for tools the catalog declares unavailable here.
    ensure_prebuild(tool, fp)?;
    let out_dir = output_directory(settings)?;
    debug!("Installing '{}' to '{}'", tool.modern_name, out_dir.display());

    let repo = tool.repository()?;
    let releases = source.releases(&repo)?;
    let asset = resolve(tool, &releases, fp)?;

    let workdir = tempfile::Builder::new().prefix("modern-").tempdir()?;
    let downloaded = source.download(asset, workdir.path())?;
    let root = extract(&downloaded)?;
    let found = locate(&root, tool, fp)?;

    let ops = platform();
    let dest = out_dir.join(ops.final_binary_name(tool.binary_stem()));
    if settings.dry_run {
        info!("[dry-run] would copy {} to {}", found.display(), dest.display());
    } else {
        fs::copy(&found, &dest)?;
        ops.make_executable(&dest)?;
    }

    let alias_file = alias_file(settings)?;
    let alias_line = ops.alias_line(&tool.legacy_name, &dest);
    let alias_added = append_alias(&alias_file, &alias_line, settings.dry_run)?;
    if alias_added {
        info!(
            "Alias '{}' -> '{}' added to `{}`",
            tool.legacy_name,
            tool.binary_stem(),
            alias_file.display()
        );
    }
    Ok(InstallOutcome {
        binary: dest,
        alias_file,
        alias_line,
        alias_added,
    })
}

/// Appends `line` unless an identical (trimmed) line is already present.
/// Returns whether the file was written.
pub fn append_alias(path: &Path, line: &str, dry_run: bool) -> Result<bool> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    if existing.lines().any(|l| l.trim() == line) {
        info!("Alias already in `{}`", path.display());
        return Ok(false);
    }
    debug!("Adding `{line}` in '{}'", path.display());
    if dry_run {
        return Ok(false);
    }
    let mut f = fs::OpenOptions::new().create(true).append(true).open(path)?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        f.write_all(b"\n")?;
    }
    f.write_all(line.as_bytes())?;
    f.write_all(b"\n")?;
    Ok(true)
}

/// Installs every batch entry of the catalog in order. Missing prebuilds are
/// skipped; any other failure is tallied and the loop continues.
pub fn install_all(
    catalog: &Catalog,
    source: &dyn ReleaseSource,
    fp: &PlatformFingerprint,
    settings: &Settings,
) -> InstallSummary {
    let mut summary = InstallSummary::default();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    for entry in catalog.batch() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(style.clone());
        pb.set_message(format!("Installing {} ({})", entry.modern_name, entry.legacy_name));
        let res = catalog
            .find_modern(&entry.modern_name)
            .and_then(|tool| install_tool(tool, source, fp, settings));
        match res {
            Ok(_) => {
                summary.installed += 1;
                pb.finish_with_message(format!("{} OK", entry.modern_name));
            }
            Err(e) if e.is_missing_prebuild() => {
                summary.skipped += 1;
                warn!("Missing prebuild for '{}', skipping: {e}", entry.modern_name);
                pb.finish_with_message(format!("{} skipped", entry.modern_name));
            }
            Err(e) => {
                error!("Error installing tool '{}': {e}", entry.modern_name);
                pb.finish_with_message(format!("{} FAILED: {e}", entry.modern_name));
                summary.failures.push((entry.modern_name.clone(), e.to_string()));
            }
        }
    }
    summary
}

use crate::platform::{PlatformOps, ALIAS_MARKER};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn home_dir(&self) -> Option<PathBuf> { dirs::home_dir() }
    fn bin_dir_candidates(&self) -> Vec<PathBuf> {
        self.home_dir()
            .map(|h| vec![h.join("bin"), h.join("AppData").join("Local").join("bin")])
            .unwrap_or_default()
    }
    fn final_binary_name(&self, base: &str) -> String { if base.ends_with(".exe") { base.to_string() } else { format!("{base}.exe") } }
    fn alias_file(&self) -> Option<PathBuf> { self.home_dir().map(|h| h.join("PowershellAliases.ps1")) }
    fn alias_line(&self, legacy: &str, target: &Path) -> String {
        format!(
            "New-Alias -Force -Name {legacy} -Value '{}' -Option ReadOnly,AllScope {ALIAS_MARKER}",
            target.display()
        )
    }
    fn make_executable(&self, _path: &Path) -> Result<()> { Ok(()) }
}

use crate::platform::{PlatformOps, ALIAS_MARKER};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

impl PlatformOps for Unix {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
    fn bin_dir_candidates(&self) -> Vec<PathBuf> {
        self.home_dir()
            .map(|h| vec![h.join("bin"), h.join(".local").join("bin")])
            .unwrap_or_default()
    }
    fn final_binary_name(&self, base: &str) -> String {
        base.to_string()
    }
    fn alias_file(&self) -> Option<PathBuf> {
        self.home_dir().map(|h| h.join(".aliases"))
    }
    fn alias_line(&self, legacy: &str, target: &Path) -> String {
        format!("alias {legacy}='{}' {ALIAS_MARKER}", target.display())
    }
    fn make_executable(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs_err::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs_err::set_permissions(path, perms)?;
        Ok(())
    }
}

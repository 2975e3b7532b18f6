pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use anyhow::Result;
use std::path::{Path, PathBuf};

mod fingerprint;

pub use fingerprint::{OsFamily, PlatformFingerprint, PlatformTag};
#[cfg(test)]
pub use fingerprint::ArchWidth;

/// Marker appended to every alias line we write.
pub const ALIAS_MARKER: &str = "# added by modern";

pub trait PlatformOps: Sync + Send {
    fn home_dir(&self) -> Option<PathBuf>;
    /// Install directories in preference order; the first existing one wins.
    fn bin_dir_candidates(&self) -> Vec<PathBuf>;
    fn final_binary_name(&self, base: &str) -> String;
    fn alias_file(&self) -> Option<PathBuf>;
    fn alias_line(&self, legacy: &str, target: &Path) -> String;
    fn make_executable(&self, path: &Path) -> Result<()>;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;

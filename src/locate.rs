use crate::catalog::ToolRecord;
use crate::error::{Error, Result};
use crate::platform::PlatformFingerprint;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// Glob matched against file names: `<stem>*`, plus `.exe` on Windows.
pub fn binary_pattern(tool: &ToolRecord, fp: &PlatformFingerprint) -> String {
    let stem = Pattern::escape(tool.binary_stem());
    format!("{stem}*{}", fp.os.exe_suffix())
}

/// Finds the tool's executable under `root`, at any depth. A file `root`
/// is checked on its own.
pub fn locate(root: &Path, tool: &ToolRecord, fp: &PlatformFingerprint) -> Result<PathBuf> {
    let pattern = binary_pattern(tool, fp);
    let not_found = || Error::BinaryNotFound {
        root: root.to_path_buf(),
        pattern: pattern.clone(),
    };
    let matcher = Pattern::new(&pattern).map_err(|_| not_found())?;
    debug!("Looking for '{pattern}' in '{}'...", root.display());

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok());
    for entry in walker {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        trace!(path = %entry.path().display(), "Checking candidate");
        if matcher.matches(&name) {
            info!("Found {}", entry.path().display());
            return Ok(entry.into_path());
        }
    }
    Err(not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::tool;
    use crate::extract::{extract, tests::write_tar_gz};
    use crate::platform::{ArchWidth, OsFamily, PlatformTag};
    use std::fs;

    fn linux() -> PlatformFingerprint {
        PlatformFingerprint::new(OsFamily::Linux, ArchWidth::Bits64)
    }

    fn windows() -> PlatformFingerprint {
        PlatformFingerprint::new(OsFamily::Windows, ArchWidth::Bits64)
    }

    #[test]
    fn pattern_uses_override_and_suffix() {
        let mut rg = tool("grep", "ripgrep", &[PlatformTag::Win]);
        assert_eq!(binary_pattern(&rg, &linux()), "ripgrep*");
        rg.binary_override_name = Some("rg".into());
        assert_eq!(binary_pattern(&rg, &linux()), "rg*");
        assert_eq!(binary_pattern(&rg, &windows()), "rg*.exe");
    }

    #[test]
    fn finds_binary_in_extracted_tar_gz() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("archive.tar.gz");
        write_tar_gz(&archive, &[("bin/tool", "binary")]);
        let root = extract(&archive).unwrap();
        let found = locate(&root, &tool("x", "tool", &[]), &linux()).unwrap();
        assert_eq!(found, root.join("bin").join("tool"));
    }

    #[test]
    fn finds_deeply_nested_binary() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("a/b/c/d/e");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("bat-v0.24.0"), b"bin").unwrap();
        fs::write(dir.path().join("README.md"), b"doc").unwrap();
        let found = locate(dir.path(), &tool("cat", "bat", &[]), &linux()).unwrap();
        assert_eq!(found, deep.join("bat-v0.24.0"));
    }

    #[test]
    fn directories_do_not_match() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("exa-v0.10.1");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("exa"), b"bin").unwrap();
        let found = locate(dir.path(), &tool("ls", "exa", &[]), &linux()).unwrap();
        assert_eq!(found, sub.join("exa"));
    }

    #[test]
    fn windows_requires_exe() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fd"), b"elf").unwrap();
        fs::write(dir.path().join("fd.exe"), b"pe").unwrap();
        let found = locate(dir.path(), &tool("find", "fd", &[]), &windows()).unwrap();
        assert_eq!(found, dir.path().join("fd.exe"));
    }

    #[test]
    fn file_root_is_its_own_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("jq-linux-amd64");
        fs::write(&raw, b"elf").unwrap();
        assert_eq!(locate(&raw, &tool("x", "jq", &[]), &linux()).unwrap(), raw);
    }

    #[test]
    fn missing_binary_names_root_and_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("LICENSE"), b"MIT").unwrap();
        match locate(dir.path(), &tool("ls", "exa", &[]), &linux()).unwrap_err() {
            Error::BinaryNotFound { root, pattern } => {
                assert_eq!(root, dir.path());
                assert_eq!(pattern, "exa*");
            }
            other => panic!("unexpected {other}"),
        }
    }
}

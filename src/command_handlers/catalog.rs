use crate::catalog::Catalog;
use crate::config::Settings;
use crate::table;
use anyhow::{Context, Result};
use fs_err as fs;
use std::io::BufWriter;
use std::path::Path;

pub(crate) fn load_catalog(settings: &Settings) -> Result<Catalog> {
    Catalog::load(settings).with_context(|| "loading tool catalog")
}

pub fn write_table(output: &Path, settings: &Settings) -> Result<()> {
    let catalog = load_catalog(settings)?;
    let file = fs::File::create(output)?;
    table::write_table(&catalog, BufWriter::new(file))
        .with_context(|| format!("writing table to {}", output.display()))?;
    println!("Wrote {} entries to {}", catalog.tools.len(), output.display());
    Ok(())
}

/// Prints every ambiguity; the exit code is their count (capped).
pub fn validate(settings: &Settings) -> Result<i32> {
    let catalog = load_catalog(settings)?;
    let problems = catalog.validate();
    if problems.is_empty() {
        println!("Catalog OK: {} entries", catalog.tools.len());
        return Ok(0);
    }
    for p in &problems {
        eprintln!("{p}");
    }
    Ok(exit_code(problems.len()))
}

pub(crate) fn exit_code(count: usize) -> i32 {
    count.min(255) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_is_capped() {
        assert_eq!(exit_code(0), 0);
        assert_eq!(exit_code(3), 3);
        assert_eq!(exit_code(1000), 255);
    }

    #[test]
    fn table_is_written_from_local_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("info.json");
        std::fs::write(
            &catalog,
            r#"[{"unix-tool": "cat", "modern-tool": "bat", "url": "https://github.com/sharkdp/bat",
                 "windows-compatible": true, "prebuild": ["lin"], "preferred": true}]"#,
        )
        .unwrap();
        let settings = Settings {
            catalog_path: Some(catalog),
            ..Settings::default()
        };
        let out = dir.path().join("README.md");
        write_table(&out, &settings).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("| `cat` ⭐ | [`bat`](https://github.com/sharkdp/bat) | ✔ | Linux |"));
    }
}

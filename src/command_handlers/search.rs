use crate::catalog::ToolRecord;
use crate::command_handlers::catalog::load_catalog;
use crate::config::Settings;
use crate::platform::PlatformFingerprint;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// A catalog entry plus what this host knows about it.
#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    tool: &'a ToolRecord,
    #[serde(rename = "host-prebuild")]
    host_prebuild: bool,
    #[serde(rename = "on-path")]
    on_path: Option<PathBuf>,
}

impl<'a> SearchHit<'a> {
    fn new(tool: &'a ToolRecord, fp: &PlatformFingerprint) -> Self {
        Self {
            tool,
            host_prebuild: tool.supports(fp.tag()),
            on_path: which::which(tool.binary_stem()).ok(),
        }
    }
}

pub fn search_unix(name: &str, settings: &Settings) -> Result<()> {
    let catalog = load_catalog(settings)?;
    print_hits(name, &catalog.search_legacy(name))
}

pub fn search_modern(name: &str, settings: &Settings) -> Result<()> {
    let catalog = load_catalog(settings)?;
    print_hits(name, &catalog.search_modern(name))
}

fn print_hits(name: &str, tools: &[&ToolRecord]) -> Result<()> {
    if tools.is_empty() {
        warn!("No catalog entry for '{name}'");
    }
    let fp = PlatformFingerprint::detect()?;
    let hits: Vec<_> = tools.iter().map(|t| SearchHit::new(t, &fp)).collect();
    println!("{}", serde_json::to_string_pretty(&hits)?);
    Ok(())
}

use crate::catalog::{Catalog, ToolRecord};
use std::io::{self, Write};

const HEADER: &str = "| Unix tool | Modern version | Windows compatible? | Has prebuild? |\n|:---:|:---:|:---:|:---:|\n";

/// Renders the catalog as a Markdown table, one row per entry in catalog order.
pub fn write_table<W: Write>(catalog: &Catalog, mut out: W) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())?;
    for tool in &catalog.tools {
        writeln!(out, "{}", row(tool))?;
    }
    out.flush()
}

fn row(tool: &ToolRecord) -> String {
    let star = if tool.preferred { " ⭐" } else { "" };
    let windows = if tool.windows_compatible { "✔" } else { "❌" };
    let prebuild = tool
        .supported_platforms
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "| `{}`{star} | [`{}`]({}) | {windows} | {prebuild} |",
        tool.legacy_name, tool.modern_name, tool.repository_url
    )
}

//! Picks the release asset built for a host out of a vendor's free-text
//! filenames.
//!
//! Matching is case-insensitive substring containment of an OS token and an
//! architecture token. Candidate `(os, arch)` pairs come from
//! [`PlatformFingerprint::candidate_pairs`] in priority order; assets are
//! walked in listing order and the first hit wins.

use crate::catalog::ToolRecord;
use crate::error::{Error, Result};
use crate::platform::PlatformFingerprint;
use crate::release::{Release, ReleaseAsset};
use tracing::{debug, trace};

/// Fails with `MissingPrebuild` when the catalog declares no build for the host.
pub fn ensure_prebuild(tool: &ToolRecord, fp: &PlatformFingerprint) -> Result<()> {
    if tool.supports(fp.tag()) {
        return Ok(());
    }
    Err(Error::MissingPrebuild {
        tool: tool.legacy_name.clone(),
        os: fp.os,
        reason: "catalog declares no prebuilt binary for this platform".into(),
    })
}

/// Selects the asset of the latest release that matches `fp`.
pub fn resolve<'a>(
    tool: &ToolRecord,
    releases: &'a [Release],
    fp: &PlatformFingerprint,
) -> Result<&'a ReleaseAsset> {
    ensure_prebuild(tool, fp)?;
    let Some(latest) = releases.first() else {
        return Err(Error::MissingPrebuild {
            tool: tool.legacy_name.clone(),
            os: fp.os,
            reason: format!("no release published for {}", tool.modern_name),
        });
    };
    if latest.assets.is_empty() {
        return Err(Error::MissingPrebuild {
            tool: tool.legacy_name.clone(),
            os: fp.os,
            reason: format!("release '{}' has no assets", latest.tag_name),
        });
    }
    pick_asset(&tool.modern_name, &latest.assets, fp)
}

/// First asset whose filename holds a candidate `(os, arch)` pair.
pub fn pick_asset<'a>(
    tool_name: &str,
    assets: &'a [ReleaseAsset],
    fp: &PlatformFingerprint,
) -> Result<&'a ReleaseAsset> {
    let pairs = fp.candidate_pairs();
    for asset in assets {
        let name = asset.filename.to_lowercase();
        for (os, arch) in &pairs {
            trace!("trying {arch}/{os} for {}", asset.filename);
            if name.contains(os) && name.contains(arch) {
                if is_darwin_collision(os, &name) {
                    trace!("'{}' matched 'win' inside 'darwin', rejected", asset.filename);
                    continue;
                }
                debug!("match found: '{}' ({os}/{arch})", asset.filename);
                return Ok(asset);
            }
        }
    }
    Err(Error::AssetNotFound {
        tool: tool_name.to_string(),
        tried: pairs.iter().map(|(o, a)| format!("{o}/{a}")).collect(),
        seen: assets.iter().map(|a| a.filename.clone()).collect(),
    })
}

// "darwin" contains "win"; only that token needs the exclusion.
fn is_darwin_collision(os_token: &str, lower_name: &str) -> bool {
    os_token == "win" && lower_name.contains("darwin")
}

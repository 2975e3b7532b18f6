use crate::catalog::Repository;
use crate::config::Settings;
use crate::error::Result;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    #[serde(rename = "name")]
    pub filename: String,
    /// Advisory only; never used to decide the archive format.
    #[serde(default)]
    pub content_type: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

impl ReleaseAsset {
    #[cfg(test)]
    pub fn new(filename: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content_type: String::new(),
            download_url: download_url.into(),
        }
    }
}

/// Where release listings and asset bytes come from.
pub trait ReleaseSource {
    /// Releases of `repo`, newest first.
    fn releases(&self, repo: &Repository) -> Result<Vec<Release>>;
    /// Writes `asset` into `dest_dir` and returns the file path.
    fn download(&self, asset: &ReleaseAsset, dest_dir: &Path) -> Result<PathBuf>;
}

pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = &settings.github_token {
            if let Ok(v) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(AUTHORIZATION, v);
            }
        }
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_url: settings.github_api_url.trim_end_matches('/').to_string(),
        })
    }

    fn releases_url(&self, repo: &Repository) -> String {
        format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.name)
    }
}

impl ReleaseSource for GitHubClient {
    fn releases(&self, repo: &Repository) -> Result<Vec<Release>> {
        let url = self.releases_url(repo);
        debug!(%url, "Fetching release listing");
        let releases: Vec<Release> = self.client.get(&url).send()?.error_for_status()?.json()?;
        debug!("{} release(s) listed for {}/{}", releases.len(), repo.owner, repo.name);
        Ok(releases)
    }

    fn download(&self, asset: &ReleaseAsset, dest_dir: &Path) -> Result<PathBuf> {
        debug!(url = %asset.download_url, "Downloading asset");
        let mut resp = self.client.get(&asset.download_url).send()?.error_for_status()?;
        // Keep only the final path component; asset names come from a remote listing.
        let name = Path::new(&asset.filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "asset".into());
        let dest = dest_dir.join(name);
        let mut out = BufWriter::new(File::create(&dest)?);
        resp.copy_to(&mut out)?;
        out.flush()?;
        Ok(dest)
    }
}

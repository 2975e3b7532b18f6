use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOG_URL: &str = "https://gist.githubusercontent.com/hugsy/b950d6c98596c02cc129ead22dfb648c/raw/487c78174b38a595c7e39a22a9a9a58e9690be77/info.json";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const LOCAL_CATALOG_FILE: &str = "info.json";

/// Runtime settings, threaded explicitly into every component that needs them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dry_run: bool,
    /// Explicit catalog file; when unset `./info.json` is used if readable.
    pub catalog_path: Option<PathBuf>,
    pub catalog_url: String,
    pub github_api_url: String,
    pub github_token: Option<String>,
    /// Overrides the platform's install directory candidates.
    pub install_dir: Option<PathBuf>,
    /// Overrides the platform's alias file.
    pub alias_file: Option<PathBuf>,
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dry_run: false,
            catalog_path: None,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            install_dir: None,
            alias_file: None,
            http_timeout_secs: 60,
        }
    }
}

/// On-disk config file (`~/.config/modern/config.toml` by default). Every key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub catalog_url: Option<String>,
    #[serde(default)]
    pub github_api_url: Option<String>,
    #[serde(default)]
    pub install_dir: Option<PathBuf>,
    #[serde(default)]
    pub alias_file: Option<PathBuf>,
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("modern").join("config.toml"))
    }

    /// Missing file is not an error; a malformed one is.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs_err::read_to_string(path)?;
        let cfg = toml::from_str::<FileConfig>(&data)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Ok(Some(cfg))
    }
}

impl Settings {
    pub fn with_file_config(mut self, file: FileConfig) -> Self {
        if file.catalog_path.is_some() {
            self.catalog_path = file.catalog_path;
        }
        if let Some(url) = file.catalog_url {
            self.catalog_url = url;
        }
        if let Some(url) = file.github_api_url {
            self.github_api_url = url;
        }
        if file.install_dir.is_some() {
            self.install_dir = file.install_dir;
        }
        if file.alias_file.is_some() {
            self.alias_file = file.alias_file;
        }
        if let Some(secs) = file.http_timeout_secs {
            self.http_timeout_secs = secs;
        }
        self
    }

    pub fn local_catalog(&self) -> Option<PathBuf> {
        if let Some(p) = &self.catalog_path {
            return Some(p.clone());
        }
        let local = PathBuf::from(LOCAL_CATALOG_FILE);
        local.is_file().then_some(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::load(&dir.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "install_dir = \"/opt/bin\"\nhttp_timeout_secs = 5\ncatalog_url = \"https://example.com/info.json\"\n",
        )
        .unwrap();
        let file = FileConfig::load(&path).unwrap().unwrap();
        let s = Settings::default().with_file_config(file);
        assert_eq!(s.install_dir, Some(PathBuf::from("/opt/bin")));
        assert_eq!(s.http_timeout_secs, 5);
        assert_eq!(s.catalog_url, "https://example.com/info.json");
        assert_eq!(s.github_api_url, DEFAULT_GITHUB_API_URL);
        assert!(s.alias_file.is_none());
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "instal_dir = \"/opt/bin\"\n").unwrap();
        assert!(matches!(FileConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn explicit_catalog_path_wins() {
        let s = Settings {
            catalog_path: Some(PathBuf::from("/tmp/catalog.json")),
            ..Settings::default()
        };
        assert_eq!(s.local_catalog(), Some(PathBuf::from("/tmp/catalog.json")));
    }
}

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::platform::PlatformTag;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

static REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://([^/\s]+)/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$").expect("valid regex")
});

/// One legacy/modern tool pair from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    #[serde(rename = "unix-tool")]
    pub legacy_name: String,
    #[serde(rename = "modern-tool")]
    pub modern_name: String,
    /// Executable name when it differs from `modern_name`.
    #[serde(rename = "modern-tool-bin", default, skip_serializing_if = "Option::is_none")]
    pub binary_override_name: Option<String>,
    #[serde(rename = "url")]
    pub repository_url: String,
    #[serde(rename = "windows-compatible", default)]
    pub windows_compatible: bool,
    #[serde(rename = "prebuild", default)]
    pub supported_platforms: Vec<PlatformTag>,
    #[serde(default)]
    pub preferred: bool,
}

impl ToolRecord {
    pub fn binary_stem(&self) -> &str {
        self.binary_override_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.modern_name)
    }

    pub fn supports(&self, tag: PlatformTag) -> bool {
        self.supported_platforms.contains(&tag)
    }

    pub fn repository(&self) -> Result<Repository> {
        Repository::parse(&self.repository_url)
    }
}

/// A forge repository parsed from `https://host/owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn parse(url: &str) -> Result<Self> {
        let caps = REPO_URL
            .captures(url.trim())
            .ok_or_else(|| Error::InvalidRepositoryUrl(url.to_string()))?;
        Ok(Self {
            host: caps[1].to_string(),
            owner: caps[2].to_string(),
            name: caps[3].to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tools: Vec<ToolRecord>,
}

impl Catalog {
    #[cfg(test)]
    pub fn new(tools: Vec<ToolRecord>) -> Self {
        Self { tools }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let tools: Vec<ToolRecord> = serde_json::from_str(data)?;
        Ok(Self { tools })
    }

    /// Local catalog file when one is readable, otherwise the remote catalog.
    pub fn load(settings: &Settings) -> Result<Self> {
        if let Some(path) = settings.local_catalog() {
            debug!(path = %path.display(), "Loading local catalog");
            let data = fs_err::read_to_string(&path)?;
            let catalog = Self::from_json(&data)?;
            info!("Collected {} tools from {}", catalog.tools.len(), path.display());
            return Ok(catalog);
        }
        debug!(url = %settings.catalog_url, "Fetching remote catalog");
        let client = reqwest::blocking::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()?;
        let data = client
            .get(&settings.catalog_url)
            .send()?
            .error_for_status()?
            .text()?;
        let catalog = Self::from_json(&data)?;
        info!("Collected {} tools from {}", catalog.tools.len(), settings.catalog_url);
        Ok(catalog)
    }

    pub fn search_legacy(&self, name: &str) -> Vec<&ToolRecord> {
        self.tools.iter().filter(|t| t.legacy_name == name).collect()
    }

    pub fn search_modern(&self, name: &str) -> Vec<&ToolRecord> {
        self.tools.iter().filter(|t| t.modern_name == name).collect()
    }

    pub fn find_modern(&self, name: &str) -> Result<&ToolRecord> {
        match self.search_modern(name).as_slice() {
            [] => Err(Error::ToolNotFound(name.to_string())),
            [one] => Ok(*one),
            many => Err(Error::AmbiguousToolName {
                name: name.to_string(),
                count: many.len(),
            }),
        }
    }

    /// The only entry for `name`, or the single preferred one among several.
    pub fn find_legacy(&self, name: &str) -> Result<&ToolRecord> {
        let matches = self.search_legacy(name);
        match matches.as_slice() {
            [] => Err(Error::ToolNotFound(name.to_string())),
            [one] => Ok(*one),
            many => {
                let preferred: Vec<_> = many.iter().filter(|t| t.preferred).collect();
                match preferred.as_slice() {
                    [one] => Ok(**one),
                    _ => Err(Error::AmbiguousToolName {
                        name: name.to_string(),
                        count: many.len(),
                    }),
                }
            }
        }
    }

    /// Every ambiguity in the catalog, one error per offending name.
    pub fn validate(&self) -> Vec<Error> {
        let mut errors = Vec::new();
        let mut modern: HashMap<&str, usize> = HashMap::new();
        let mut legacy: Vec<&str> = Vec::new();
        for t in &self.tools {
            *modern.entry(t.modern_name.as_str()).or_default() += 1;
            if !legacy.contains(&t.legacy_name.as_str()) {
                legacy.push(&t.legacy_name);
            }
        }
        let mut dup_modern: Vec<_> = modern.into_iter().filter(|(_, n)| *n > 1).collect();
        dup_modern.sort();
        for (name, count) in dup_modern {
            errors.push(Error::AmbiguousToolName {
                name: name.to_string(),
                count,
            });
        }
        for name in legacy {
            if let Err(e) = self.find_legacy(name) {
                errors.push(e);
            }
        }
        errors
    }

    /// Entries an install-all run processes, in catalog order. Non-preferred
    /// entries sharing a legacy name with others are left out.
    pub fn batch(&self) -> Vec<&ToolRecord> {
        self.tools
            .iter()
            .filter(|t| {
                let shared = self.tools.iter().filter(|o| o.legacy_name == t.legacy_name).count() > 1;
                if shared && !t.preferred {
                    debug!(
                        "'{}' has several replacements, skipping non-preferred '{}'",
                        t.legacy_name, t.modern_name
                    );
                    return false;
                }
                true
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    pub(crate) fn tool(legacy: &str, modern: &str, prebuild: &[PlatformTag]) -> ToolRecord {
        ToolRecord {
            legacy_name: legacy.into(),
            modern_name: modern.into(),
            binary_override_name: None,
            repository_url: format!("https://github.com/someone/{modern}"),
            windows_compatible: true,
            supported_platforms: prebuild.to_vec(),
            preferred: false,
        }
    }

    const SAMPLE: &str = r#"[
        {"unix-tool": "ls", "modern-tool": "exa", "url": "https://github.com/ogham/exa",
         "windows-compatible": false, "prebuild": ["lin", "mac"], "preferred": true},
        {"unix-tool": "ls", "modern-tool": "lsd", "url": "https://github.com/Peltoche/lsd",
         "windows-compatible": true, "prebuild": ["win", "lin", "mac"], "preferred": false},
        {"unix-tool": "grep", "modern-tool": "ripgrep", "modern-tool-bin": "rg",
         "url": "https://github.com/BurntSushi/ripgrep", "windows-compatible": true,
         "prebuild": ["win", "lin", "mac"], "preferred": false},
        {"unix-tool": "cat", "modern-tool": "bat", "url": "https://github.com/sharkdp/bat",
         "windows-compatible": true, "prebuild": ["win", "lin", "mac"]}
    ]"#;

    #[test]
    fn parses_catalog_keys() {
        let c = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(c.tools.len(), 4);
        let rg = &c.tools[2];
        assert_eq!(rg.legacy_name, "grep");
        assert_eq!(rg.binary_stem(), "rg");
        assert!(rg.supports(PlatformTag::Win));
        assert!(!c.tools[0].supports(PlatformTag::Win));
        assert!(!c.tools[3].preferred);
    }

    #[test]
    fn unknown_platform_tag_is_rejected() {
        let bad = r#"[{"unix-tool": "ls", "modern-tool": "exa", "url": "https://github.com/ogham/exa",
                      "windows-compatible": false, "prebuild": ["bsd"], "preferred": false}]"#;
        assert!(matches!(Catalog::from_json(bad), Err(Error::Json(_))));
    }

    #[test]
    fn find_modern_is_exact() {
        let c = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(c.find_modern("bat").unwrap().legacy_name, "cat");
        assert!(matches!(c.find_modern("ba"), Err(Error::ToolNotFound(_))));
    }

    #[test]
    fn duplicate_modern_is_ambiguous() {
        let mut c = Catalog::from_json(SAMPLE).unwrap();
        c.tools.push(tool("more", "bat", &[PlatformTag::Lin]));
        assert!(matches!(
            c.find_modern("bat"),
            Err(Error::AmbiguousToolName { count: 2, .. })
        ));
    }

    #[test]
    fn find_legacy_uses_preferred() {
        let c = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(c.find_legacy("ls").unwrap().modern_name, "exa");
        assert_eq!(c.search_legacy("ls").len(), 2);
    }

    #[test]
    fn find_legacy_without_preferred_is_ambiguous() {
        let c = Catalog::new(vec![
            tool("find", "fd", &[PlatformTag::Lin]),
            tool("find", "fselect", &[PlatformTag::Lin]),
        ]);
        assert!(matches!(
            c.find_legacy("find"),
            Err(Error::AmbiguousToolName { ref name, count: 2 }) if name == "find"
        ));
    }

    #[test]
    fn validate_reports_every_ambiguity() {
        let mut c = Catalog::from_json(SAMPLE).unwrap();
        assert!(c.validate().is_empty());
        c.tools.push(tool("find", "fd", &[]));
        c.tools.push(tool("find", "fselect", &[]));
        c.tools.push(tool("more", "bat", &[]));
        let names: Vec<String> = c
            .validate()
            .into_iter()
            .map(|e| match e {
                Error::AmbiguousToolName { name, .. } => name,
                other => panic!("unexpected {other}"),
            })
            .collect();
        assert_eq!(names, vec!["bat", "find"]);
    }

    #[test]
    fn batch_skips_non_preferred_duplicates() {
        let c = Catalog::from_json(SAMPLE).unwrap();
        let names: Vec<_> = c.batch().iter().map(|t| t.modern_name.as_str()).collect();
        assert_eq!(names, vec!["exa", "ripgrep", "bat"]);
    }

    #[rstest]
    #[case("https://github.com/ogham/exa", "github.com", "ogham", "exa")]
    #[case("https://github.com/ogham/exa/", "github.com", "ogham", "exa")]
    #[case("https://github.com/ogham/exa.git", "github.com", "ogham", "exa")]
    #[case("http://gitlab.com/a/b", "gitlab.com", "a", "b")]
    fn parses_repository_urls(
        #[case] url: &str,
        #[case] host: &str,
        #[case] owner: &str,
        #[case] name: &str,
    ) {
        let r = Repository::parse(url).unwrap();
        assert_eq!((r.host.as_str(), r.owner.as_str(), r.name.as_str()), (host, owner, name));
    }

    #[rstest]
    #[case("github.com/ogham/exa")]
    #[case("https://github.com/ogham")]
    #[case("https://github.com/ogham/exa/releases")]
    #[case("")]
    fn rejects_bad_repository_urls(#[case] url: &str) {
        assert!(matches!(
            Repository::parse(url),
            Err(Error::InvalidRepositoryUrl(_))
        ));
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::OsFamily;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported operating system: {0}")]
    UnsupportedOperatingSystem(String),

    #[error("unsupported architecture: {0}-bit pointer width")]
    UnsupportedPlatform(u32),

    /// Expected and common: batch installs skip it instead of counting a failure.
    #[error("no prebuilt binary of '{tool}' for {os}: {reason}")]
    MissingPrebuild {
        tool: String,
        os: OsFamily,
        reason: String,
    },

    #[error(
        "no release asset of '{tool}' matched any of [{}] (assets seen: [{}])",
        .tried.join(", "),
        .seen.join(", ")
    )]
    AssetNotFound {
        tool: String,
        tried: Vec<String>,
        seen: Vec<String>,
    },

    #[error("failed to extract {}: {source}", .path.display())]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no file matching '{pattern}' found under {}", .root.display())]
    BinaryNotFound { root: PathBuf, pattern: String },

    #[error("tool name '{name}' is ambiguous ({count} catalog entries match)")]
    AmbiguousToolName { name: String, count: usize },

    #[error("tool '{0}' not found in catalog")]
    ToolNotFound(String),

    #[error("invalid repository URL '{0}' (expected https://host/owner/repo)")]
    InvalidRepositoryUrl(String),

    #[error("no writable install directory found (tried: {tried})")]
    NoWritableDirectory { tried: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn is_missing_prebuild(&self) -> bool {
        matches!(self, Error::MissingPrebuild { .. })
    }

    pub(crate) fn extraction(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::ExtractionFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Platform tag used by the catalog's `prebuild` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    Win,
    Lin,
    Mac,
}

impl PlatformTag {
    pub fn label(self) -> &'static str {
        match self {
            PlatformTag::Win => "Windows",
            PlatformTag::Lin => "Linux",
            PlatformTag::Mac => "macOS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    Linux,
    Darwin,
}

impl OsFamily {
    /// Filename substrings for this OS, most specific first.
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            OsFamily::Windows => &["windows", "msvc", "win"],
            OsFamily::Linux => &["linux", "lin", "lnx"],
            OsFamily::Darwin => &["mac", "osx", "darwin"],
        }
    }

    pub fn tag(self) -> PlatformTag {
        match self {
            OsFamily::Windows => PlatformTag::Win,
            OsFamily::Linux => PlatformTag::Lin,
            OsFamily::Darwin => PlatformTag::Mac,
        }
    }

    pub fn exe_suffix(self) -> &'static str {
        match self {
            OsFamily::Windows => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Darwin => "darwin",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchWidth {
    Bits64,
    Bits32,
}

impl ArchWidth {
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            ArchWidth::Bits64 => &["amd64", "x86_64"],
            ArchWidth::Bits32 => &["x86", "i686"],
        }
    }
}

impl fmt::Display for ArchWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchWidth::Bits64 => f.write_str("64bit"),
            ArchWidth::Bits32 => f.write_str("32bit"),
        }
    }
}

/// Canonical OS family and CPU width of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformFingerprint {
    pub os: OsFamily,
    pub arch: ArchWidth,
}

impl PlatformFingerprint {
    #[cfg(test)]
    pub fn new(os: OsFamily, arch: ArchWidth) -> Self {
        Self { os, arch }
    }

    /// Fingerprint of the running host.
    pub fn detect() -> Result<Self> {
        Self::from_host(std::env::consts::OS, usize::BITS)
    }

    /// Maps an OS name (as reported by `std::env::consts::OS` or `uname`) and a
    /// pointer width onto a fingerprint.
    pub fn from_host(os: &str, pointer_width: u32) -> Result<Self> {
        let os = match os.to_ascii_lowercase().as_str() {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "darwin" | "macos" => OsFamily::Darwin,
            other => return Err(Error::UnsupportedOperatingSystem(other.to_string())),
        };
        let arch = match pointer_width {
            64 => ArchWidth::Bits64,
            32 => ArchWidth::Bits32,
            other => return Err(Error::UnsupportedPlatform(other)),
        };
        Ok(Self { os, arch })
    }

    pub fn tag(&self) -> PlatformTag {
        self.os.tag()
    }

    /// Ordered `(os_token, arch_token)` pairs; earlier pairs win.
    pub fn candidate_pairs(&self) -> Vec<(&'static str, &'static str)> {
        self.os
            .tokens()
            .iter()
            .flat_map(|o| self.arch.tokens().iter().map(move |a| (*o, *a)))
            .collect()
    }
}

impl fmt::Display for PlatformFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.os, self.arch)
    }
}

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use fs_err as fs;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};
use zip::ZipArchive;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const ZIP_EMPTY_MAGIC: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const TAR_GZ_SUFFIXES: [&str; 2] = [".tar.gz", ".tgz"];

/// Directory name archives are expanded into, next to the downloaded file.
pub const EXTRACT_DIR: &str = "extracted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
    None,
}

impl ArchiveFormat {
    /// Detect from leading bytes. Gzip alone is ambiguous, so tar+gzip also
    /// needs a tar-gzip file name.
    pub fn from_magic_bytes(bytes: &[u8], file_name: &str) -> Self {
        if bytes.starts_with(&ZIP_MAGIC) || bytes.starts_with(&ZIP_EMPTY_MAGIC) {
            return ArchiveFormat::Zip;
        }
        let name = file_name.to_lowercase();
        if bytes.starts_with(&GZIP_MAGIC) && TAR_GZ_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            return ArchiveFormat::TarGz;
        }
        ArchiveFormat::None
    }

    pub fn detect(path: &Path) -> Result<Self> {
        let mut header = [0u8; 4];
        let mut file = fs::File::open(path)?;
        let mut read = 0;
        while read < header.len() {
            let n = file.read(&mut header[read..])?;
            if n == 0 {
                break;
            }
            read += n;
        }
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        Ok(Self::from_magic_bytes(&header[..read], &name))
    }
}

/// Expands a zip or tar+gzip download into a fresh `extracted/` directory
/// beside it and returns that directory. Anything else is returned as is.
pub fn extract(downloaded: &Path) -> Result<PathBuf> {
    let format = ArchiveFormat::detect(downloaded)?;
    let dest = downloaded
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(EXTRACT_DIR);
    match format {
        ArchiveFormat::Zip => {
            debug!("Extracting zip '{}' to '{}'", downloaded.display(), dest.display());
            extract_zip(downloaded, &dest)?;
        }
        ArchiveFormat::TarGz => {
            debug!("Extracting tar.gz '{}' to '{}'", downloaded.display(), dest.display());
            extract_tar_gz(downloaded, &dest)?;
        }
        ArchiveFormat::None => {
            info!("No archive format found for '{}'", downloaded.display());
            return Ok(downloaded.to_path_buf());
        }
    }
    Ok(dest)
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::extraction(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| Error::extraction(archive, e))?;
    fs::create_dir_all(dest).map_err(|e| Error::extraction(archive, e))?;
    zip.extract(dest).map_err(|e| Error::extraction(archive, e))
}

fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::extraction(archive, e))?;
    fs::create_dir_all(dest).map_err(|e| Error::extraction(archive, e))?;
    let mut tar = Archive::new(GzDecoder::new(file));
    tar.unpack(dest).map_err(|e| Error::extraction(archive, e))
}

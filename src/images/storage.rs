//! Filesystem-level content-addressed image storage.
//!
//! Images live flat under `{base_dir}/{sha256-hex}.jpg`. The extension is
//! fixed: the bytes are never decoded or sniffed.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use mercato_common::paths::{is_allowed_image, is_plain_file_name};
use mercato_common::{Error, Result};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

/// Extension given to every stored image.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Filesystem manager for image storage.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    base_dir: PathBuf,
}

impl ImageStorage {
    /// Open the image root at `base_dir`, creating it if needed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// The directory images are stored in.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Store image bytes and return their content-derived filename.
    ///
    /// If a file with that name already exists nothing is written. New
    /// content goes to a temporary file in the image root first and is then
    /// linked into place without clobbering, so a concurrent upload of the
    /// same bytes either wins the link or finds the finished file.
    pub fn store(&self, data: &[u8]) -> Result<String> {
        let filename = format_filename(&compute_hash(data));
        let path = self.base_dir.join(&filename);

        if self.contains(&filename)? {
            tracing::debug!(image = %filename, "Image already stored");
            return Ok(filename);
        }

        let mut tmp = NamedTempFile::new_in(&self.base_dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => {
                tracing::debug!(image = %filename, bytes = data.len(), "Stored image");
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(image = %filename, "Image stored concurrently");
            }
            Err(e) => return Err(e.error.into()),
        }

        Ok(filename)
    }

    /// Resolve a stored filename to its path inside the image root.
    ///
    /// Anything other than a bare filename is rejected, so the result can
    /// never point outside the root.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        if !is_plain_file_name(filename) {
            tracing::warn!(filename, "Rejected unsafe image filename");
            return Err(Error::validation(format!(
                "invalid image filename: {filename:?}"
            )));
        }
        Ok(self.base_dir.join(filename))
    }

    /// Whether a file with this name is present in the image root.
    pub fn contains(&self, filename: &str) -> Result<bool> {
        Ok(self.path_for(filename)?.is_file())
    }

    /// Open a stored image for reading.
    ///
    /// A missing file is reported as [`Error::NotFound`]; there is no
    /// placeholder fallback.
    pub fn retrieve(&self, filename: &str) -> Result<File> {
        let path = self.path_for(filename)?;
        match File::open(&path) {
            Ok(file) if file.metadata()?.is_file() => Ok(file),
            Ok(_) => Err(Error::not_found("image", filename)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::not_found("image", filename)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Check that an uploaded file's name carries an accepted image extension.
pub fn validate_image_type(filename: &str) -> Result<()> {
    if is_allowed_image(Path::new(filename)) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "unsupported image type {filename:?}; expected .jpg, .jpeg or .png"
        )))
    }
}

/// Compute the content hash for image data: the full SHA-256 digest as
/// lowercase hex.
fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Format the stored filename for a content hash.
fn format_filename(hash: &str) -> String {
    format!("{hash}.{IMAGE_EXTENSION}")
}

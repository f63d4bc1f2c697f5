use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::warn;
use uuid::Uuid;

use crate::errors::UploadError;

const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Outcome of persisting an uploaded file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub original_filename: String,
    pub size: i64,
}

/// Filesystem store for uploaded photos. Stored names are collision-resistant
/// (uuid hex + original extension) and unique across the whole store.
#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Result<Self, UploadError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(UploadStore { root, max_bytes })
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Validates and persists the payload under a freshly generated name.
    /// Rejects disallowed extensions and payloads whose magic bytes are not
    /// an image format.
    pub fn store(&self, temp_path: &Path, original_name: &str) -> Result<StoredFile, UploadError> {
        let original_filename = sanitize_filename(original_name);
        let extension = extension_of(&original_filename)
            .ok_or_else(|| UploadError::DisallowedType(original_filename.clone()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::DisallowedType(original_filename));
        }

        let metadata = fs::metadata(temp_path)?;
        if metadata.len() == 0 {
            return Err(UploadError::EmptyUpload);
        }
        if metadata.len() > self.max_bytes as u64 {
            return Err(UploadError::TooLarge(self.max_bytes));
        }

        let sniffed = infer::get_from_path(temp_path)?;
        match sniffed {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {}
            _ => return Err(UploadError::DisallowedType(original_filename)),
        }

        let filename = format!("{}.{}", Uuid::new_v4().simple(), extension);
        let target = self.path_of(&filename);

        // TempFile payloads may live on another filesystem, so fs::rename
        // cannot be relied on.
        fs::copy(temp_path, &target)?;

        Ok(StoredFile {
            filename,
            original_filename,
            size: metadata.len() as i64,
        })
    }

    /// Removes a stored file. A file that is already gone counts as success
    /// so that record cleanup stays idempotent.
    pub fn remove(&self, filename: &str) -> Result<(), UploadError> {
        match fs::remove_file(self.path_of(filename)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(filename, "Stored file was already absent during removal");
                Ok(())
            }
            Err(e) => Err(UploadError::RemovalFailed(e.to_string())),
        }
    }

    pub fn read(&self, filename: &str) -> Result<Vec<u8>, UploadError> {
        Ok(fs::read(self.path_of(filename))?)
    }
}

/// Strips path components and collapses anything outside `[A-Za-z0-9._-]`,
/// mirroring what the upload form promises about user-supplied names.
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .trim_start_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

use std::fs;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use thiserror::Error;

/// Result type returned by the upload helpers.
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur while persisting an uploaded file.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to store uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores uploaded product images under a public static directory.
///
/// Writing the file and writing the product row are two separate steps:
/// an upload failure aborts the row write, while a row write failing after
/// a successful copy leaves an orphaned file behind. The orphan is an
/// accepted residue and is not cleaned up.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    /// Create a store rooted at `root`, served publicly under `/uploads`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_prefix: "/uploads".to_string(),
        }
    }

    /// Directory the files are written to, for static file serving.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy the uploaded file into the store and return its public path.
    ///
    /// The stored name is the original basename prefixed with a millisecond
    /// timestamp to keep repeated uploads of the same file apart.
    pub fn save(&self, file: &TempFile) -> UploadResult<String> {
        let original = file
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("image");

        let stored_name = format!("{}-{}", chrono::Utc::now().timestamp_millis(), original);
        let destination = self.root.join(&stored_name);

        fs::create_dir_all(&self.root)?;
        fs::copy(file.file.path(), &destination)?;

        Ok(format!("{}/{}", self.public_prefix, stored_name))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_upload(name: Option<&str>, contents: &[u8]) -> TempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents).expect("write upload contents");

        TempFile {
            file,
            content_type: None,
            file_name: name.map(str::to_string),
            size: contents.len(),
        }
    }

    #[test]
    fn save_copies_file_and_returns_public_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = ImageStore::new(dir.path());
        let upload = temp_upload(Some("pen.png"), b"png bytes");

        let public_path = store.save(&upload).expect("expected save to succeed");

        assert!(public_path.starts_with("/uploads/"));
        assert!(public_path.ends_with("-pen.png"));

        let stored_name = public_path.trim_start_matches("/uploads/");
        let stored = dir.path().join(stored_name);
        assert_eq!(fs::read(stored).expect("read stored file"), b"png bytes");
    }

    #[test]
    fn save_strips_directories_from_client_filename() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = ImageStore::new(dir.path());
        let upload = temp_upload(Some("../../etc/pen.png"), b"data");

        let public_path = store.save(&upload).expect("expected save to succeed");

        assert!(public_path.ends_with("-pen.png"));
        assert!(!public_path.contains(".."));
    }

    #[test]
    fn save_falls_back_to_generic_name_without_filename() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = ImageStore::new(dir.path());
        let upload = temp_upload(None, b"data");

        let public_path = store.save(&upload).expect("expected save to succeed");

        assert!(public_path.ends_with("-image"));
    }

    #[test]
    fn save_creates_missing_uploads_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = ImageStore::new(dir.path().join("public").join("uploads"));
        let upload = temp_upload(Some("pen.png"), b"data");

        assert!(store.save(&upload).is_ok());
        assert!(store.root().is_dir());
    }
}

//! Upload directory - stores incoming image files under generated names
//!
//! Files are written as `<unix micros>-<random hex><ext>` with create-new
//! semantics, so concurrent uploads never share or overwrite a file. The
//! path recorded in the database is `uploads/<file name>`; only the file
//! name component is used when mapping it back to disk.

use std::io;
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, MultipartError};
use chrono::Utc;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Leading segment of every stored image path.
pub const STORED_PREFIX: &str = "uploads";

/// Upload error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

/// Local directory holding uploaded files.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory (and parents) if missing.
    pub async fn ensure_exists(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Open a new, empty file for an upload named `original_name` by the client.
    pub async fn create(&self, original_name: &str) -> io::Result<PendingUpload> {
        let file_name = generate_file_name(original_name);
        let disk_path = self.root.join(&file_name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&disk_path)
            .await?;

        Ok(PendingUpload {
            file,
            disk_path,
            stored_path: format!("{}/{}", STORED_PREFIX, file_name),
            bytes: 0,
        })
    }

    /// Stream a multipart file part to disk.
    ///
    /// Returns `Ok(None)` when the part carries no file (no file name, or an
    /// empty one, which is what browsers send for an untouched file input).
    /// A partially written file is removed if the stream fails.
    pub async fn receive(&self, mut field: Field<'_>) -> Result<Option<StoredUpload>, UploadError> {
        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => return Ok(None),
        };

        let mut pending = self.create(&original_name).await?;
        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    pending.discard().await;
                    return Err(e.into());
                }
            };
            if let Err(e) = pending.write_chunk(&chunk).await {
                pending.discard().await;
                return Err(e.into());
            }
        }

        let stored = pending.finish().await?;
        tracing::debug!(
            original = %original_name,
            path = %stored.stored_path,
            bytes = stored.bytes,
            "Stored upload"
        );
        Ok(Some(stored))
    }

    /// Map a stored path back to a file inside this directory.
    ///
    /// Returns `None` if the path has no file name component.
    pub fn resolve(&self, stored_path: &str) -> Option<PathBuf> {
        let name = Path::new(stored_path).file_name()?;
        Some(self.root.join(name))
    }

    /// Best-effort removal of a stored file.
    ///
    /// Returns true if a file was deleted. A missing file is not an error;
    /// any other failure is logged and swallowed.
    pub async fn remove(&self, stored_path: &str) -> bool {
        let Some(disk_path) = self.resolve(stored_path) else {
            tracing::warn!(path = %stored_path, "Stored image path has no file name");
            return false;
        };
        remove_quietly(&disk_path).await
    }
}

/// A file being written; dropped without [`finish`](Self::finish) it stays on disk.
#[derive(Debug)]
pub struct PendingUpload {
    file: File,
    disk_path: PathBuf,
    stored_path: String,
    bytes: u64,
}

impl PendingUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.bytes += chunk.len() as u64;
        Ok(())
    }

    /// Flush and close the file.
    pub async fn finish(mut self) -> io::Result<StoredUpload> {
        if let Err(e) = self.file.flush().await {
            remove_quietly(&self.disk_path).await;
            return Err(e);
        }

        Ok(StoredUpload {
            disk_path: self.disk_path,
            stored_path: self.stored_path,
            bytes: self.bytes,
        })
    }

    /// Close and delete the partial file.
    pub async fn discard(self) {
        drop(self.file);
        remove_quietly(&self.disk_path).await;
    }
}

/// A fully written upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub disk_path: PathBuf,
    /// Relative path recorded with the submission (`uploads/<file name>`)
    pub stored_path: String,
    pub bytes: u64,
}

impl StoredUpload {
    /// Delete the file for a submission that will not be recorded.
    pub async fn discard(self) {
        remove_quietly(&self.disk_path).await;
    }
}

/// Generate a collision-resistant file name keeping the original extension.
pub fn generate_file_name(original_name: &str) -> String {
    let micros = Utc::now().timestamp_micros();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{}-{}{}", micros, &nonce[..8], extension_of(original_name))
}

/// `.ext` of the client's file name, if it is plain ASCII alphanumeric.
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

async fn remove_quietly(path: &Path) -> bool {
    match fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed upload");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
            false
        }
    }
}

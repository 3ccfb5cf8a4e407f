//! Destination path mapping and streaming writes.
//!
//! Maps request URL paths onto directories under the storage root, creates
//! them on demand, and copies inbound byte streams into create-or-truncate
//! files. Copies are chunked and backpressure-aware; the whole payload is
//! never held in memory.

use crate::error::UploadError;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Destination directory for a request path: the path is appended verbatim
/// to the storage root (one trailing slash stripped, no normalization).
pub fn dest_dir(root: &Path, request_path: &str) -> PathBuf {
    let trimmed = request_path.trim_end_matches('/');
    root.join(trimmed.trim_start_matches('/'))
}

/// Create `dir` and all missing ancestors. A pre-existing directory is not
/// an error.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Reject filenames that would land outside the destination directory.
///
/// The upstream behavior was undefined here; this implementation refuses
/// empty names, path separators and the `.`/`..` segments, and accepts
/// everything else verbatim.
pub fn validate_filename(name: &str) -> Result<(), UploadError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(UploadError::InvalidFilename(name.to_string()));
    }
    Ok(())
}

/// Stream `reader` into a newly created (or truncated) file at `path`.
/// Bytes are written in arrival order; returns the byte count on success.
pub async fn write_stream<R>(path: &Path, reader: &mut R) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut file = tokio::fs::File::create(path).await?;
    let written = tokio::io::copy(reader, &mut file).await?;
    file.flush().await?;
    Ok(written)
}

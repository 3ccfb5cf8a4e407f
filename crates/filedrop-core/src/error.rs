//! Request-level error taxonomy and HTTP mapping.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Everything that can go wrong while handling one upload request.
///
/// Only the filename and form-body cases are client errors; I/O failures
/// map to 500 and are logged by the handler before conversion.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Binary mode without the `file-name` header.
    #[error("file name is required")]
    MissingFilename,

    /// Filename that would escape the destination directory.
    #[error("invalid file name: {0}")]
    InvalidFilename(String),

    /// Form-mode body that is neither multipart nor URL-encoded.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Malformed multipart body (bad boundary, truncated part, ...).
    #[error("malformed form body: {0}")]
    Multipart(#[from] multer::Error),

    /// Filesystem or body-stream failure while writing the upload.
    #[error("upload failed: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::MissingFilename
            | UploadError::InvalidFilename(_)
            | UploadError::UnsupportedContentType(_)
            | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        // Every response carries the CORS and connection-close baseline,
        // errors included.
        let body = self.to_string();
        Response::builder()
            .status(self.status())
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .header(header::CONNECTION, "close")
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

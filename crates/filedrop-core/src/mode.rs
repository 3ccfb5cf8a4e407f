//! Upload encoding dispatch.
//!
//! The service supports two encodings: a raw binary body named via the
//! `file-name` header, and form bodies (multipart or URL-encoded) carrying
//! filenames per part. The choice is a pure function of the declared
//! Content-Type so it can be tested without any I/O.

/// The media type that selects binary mode.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// How the request body is encoded, decided from the Content-Type header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// Whole body is one file's raw bytes; filename comes from the
    /// `file-name` request header.
    Binary,
    /// Body is a multipart or URL-encoded form; filenames come from the
    /// individual parts.
    Form,
}

impl UploadMode {
    /// Decide the upload mode from a declared Content-Type value.
    ///
    /// Binary mode requires the media type `application/octet-stream`
    /// (parameters stripped, ASCII case-insensitive). Everything else,
    /// including a missing header, is handled as a form body.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(ct) = content_type else {
            return UploadMode::Form;
        };
        let media_type = ct.split(';').next().unwrap_or("").trim();
        if media_type.eq_ignore_ascii_case(OCTET_STREAM) {
            UploadMode::Binary
        } else {
            UploadMode::Form
        }
    }
}

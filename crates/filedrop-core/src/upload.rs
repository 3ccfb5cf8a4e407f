//! The upload handler: every POST, any path, streamed to disk.
//!
//! Path resolution and dispatch per request: the URL path names the
//! destination directory under the storage root; the Content-Type header
//! picks binary or form handling. Binary bodies and multipart file parts
//! are piped to disk chunk by chunk, so a slow disk pauses the inbound
//! read instead of buffering the payload.

use crate::error::UploadError;
use crate::mode::UploadMode;
use crate::server::ServerState;
use crate::storage;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

/// Request header naming the target file in binary mode.
pub const FILE_NAME_HEADER: &str = "file-name";

/// Entry point for every request that reaches the fallback route.
pub async fn handle_request(State(state): State<Arc<ServerState>>, req: Request) -> Response {
    let method = req.method().clone();
    if method == Method::POST {
        let path = req.uri().path().to_string();
        let (parts, body) = req.into_parts();
        match handle_upload(&state, &path, &parts.headers, body).await {
            Ok(resp) => resp,
            Err(err) => {
                match err {
                    UploadError::Io(_) => {
                        tracing::error!(path = %path, error = %err, "upload failed")
                    }
                    _ => tracing::debug!(path = %path, error = %err, "upload rejected"),
                }
                err.into_response()
            }
        }
    } else if method == Method::OPTIONS {
        preflight_response()
    } else {
        not_found_response()
    }
}

/// One upload request: ensure the destination directory, then dispatch on
/// the declared content type.
async fn handle_upload(
    state: &ServerState,
    path: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<Response, UploadError> {
    let dir = storage::dest_dir(&state.storage_root, path);
    // Synchronous and idempotent, before any streaming begins.
    storage::ensure_dir(&dir)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match UploadMode::from_content_type(content_type) {
        UploadMode::Binary => receive_binary(&dir, path, headers, body).await,
        UploadMode::Form => receive_form(&dir, path, content_type, body).await,
    }
}

/// Binary mode: the whole body is one file, named by the `file-name` header.
async fn receive_binary(
    dir: &Path,
    path: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<Response, UploadError> {
    // Missing header: reject without consuming the body.
    let filename = headers
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(UploadError::MissingFilename)?;
    storage::validate_filename(filename)?;

    let dest = dir.join(filename);
    let stream = body.into_data_stream().map_err(io::Error::other);
    let mut reader = StreamReader::new(stream);
    let written = storage::write_stream(&dest, &mut reader).await?;
    tracing::info!(path = %path, filename = %filename, bytes = written, "binary upload stored");

    Ok(success_response(path))
}

/// Form mode: multipart bodies stream file parts to disk; URL-encoded
/// bodies are decoded and their fields logged only.
async fn receive_form(
    dir: &Path,
    path: &str,
    content_type: Option<&str>,
    body: Body,
) -> Result<Response, UploadError> {
    let ct = content_type.unwrap_or("");
    if let Ok(boundary) = multer::parse_boundary(ct) {
        receive_multipart(dir, path, boundary, body).await
    } else if is_urlencoded(ct) {
        receive_urlencoded(path, body).await
    } else {
        Err(UploadError::UnsupportedContentType(ct.to_string()))
    }
}

fn is_urlencoded(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    media_type.eq_ignore_ascii_case("application/x-www-form-urlencoded")
}

/// Walk the multipart stream; each file part goes to disk under its
/// declared filename as its bytes arrive, plain fields are logged.
async fn receive_multipart(
    dir: &Path,
    path: &str,
    boundary: String,
    body: Body,
) -> Result<Response, UploadError> {
    let mut multipart = multer::Multipart::new(body.into_data_stream(), boundary);
    let mut files = 0usize;

    while let Some(mut field) = multipart.next_field().await? {
        if let Some(filename) = field.file_name().map(str::to_owned) {
            storage::validate_filename(&filename)?;
            let dest = dir.join(&filename);
            let mut file = tokio::fs::File::create(&dest).await?;
            while let Some(chunk) = field.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            files += 1;
            tracing::info!(path = %path, filename = %filename, "form file stored");
        } else {
            let name = field.name().unwrap_or("").to_string();
            let value = field.text().await?;
            tracing::debug!(field = %name, value = %value, "form field");
        }
    }

    tracing::info!(path = %path, files, "form upload complete");
    Ok(success_response(path))
}

/// URL-encoded form: nothing is persisted, fields are diagnostic only.
async fn receive_urlencoded(path: &str, body: Body) -> Result<Response, UploadError> {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(io::Error::other)?;
    for (name, value) in url::form_urlencoded::parse(&bytes) {
        tracing::debug!(field = %name, value = %value, "form field");
    }
    Ok(success_response(path))
}

/// 200 with `Location: <path>/` and the CORS/connection-close baseline.
fn success_response(path: &str) -> Response {
    let location = format!("{}/", path.trim_end_matches('/'));
    Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::CONNECTION, "close")
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// CORS preflight so browsers can POST cross-origin.
fn preflight_response() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS")
        .header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type, file-name",
        )
        .header(header::CONNECTION, "close")
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Anything that is not POST or OPTIONS.
fn not_found_response() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::CONNECTION, "close")
        .body(Body::from("not found"))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_media_type_detection() {
        assert!(is_urlencoded("application/x-www-form-urlencoded"));
        assert!(is_urlencoded(
            "application/x-www-form-urlencoded; charset=UTF-8"
        ));
        assert!(!is_urlencoded("multipart/form-data; boundary=xyz"));
        assert!(!is_urlencoded(""));
    }

    #[test]
    fn success_response_location_has_trailing_slash() {
        let resp = success_response("/uploads/a/b");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/uploads/a/b/"
        );
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert_eq!(resp.headers().get(header::CONNECTION).unwrap(), "close");
    }

    #[test]
    fn success_response_does_not_double_slash() {
        let resp = success_response("/x/");
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/x/");
        let resp = success_response("/");
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }
}

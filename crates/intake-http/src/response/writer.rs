//! JSON and attachment response construction.

use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use intake_core::sniff::detect_content_type;
use serde::Serialize;

use crate::error::{ErrorKind, Result};
use crate::response::Envelope;

/// Serializes `payload` as JSON and writes it with the given status code.
///
/// Extra headers are applied first and `content-type` is set last, so the
/// response is always declared as `application/json` regardless of what the
/// caller passes. Fails with [`ErrorKind::EncodeError`] only when
/// serialization itself fails, in which case no response is produced.
pub fn write_json<T>(
    status: StatusCode,
    payload: &T,
    headers: Option<HeaderMap>,
) -> Result<Response>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(payload).map_err(|err| {
        ErrorKind::EncodeError.with_context(format!("JSON serialization failed: {}", err))
    })?;

    let mut response = (status, body).into_response();

    if let Some(extra) = headers {
        response.headers_mut().extend(extra);
    }
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(response)
}

/// Wraps an error into a failure [`Envelope`] and writes it as JSON.
///
/// Uses the error's custom message when present, falling back to the kind's
/// canned client-safe message. The status defaults to the kind's mapped
/// status code unless overridden.
pub fn write_error_json(
    error: &crate::Error<'_>,
    status: Option<StatusCode>,
) -> Result<Response> {
    let canned = error.kind().response();
    let message = error.message().unwrap_or(canned.message.as_ref());

    let envelope = Envelope::failure(message);
    write_json(status.unwrap_or(canned.status), &envelope, None)
}

/// Builds a static-file download response.
///
/// Reads the file at `path` and serves it with a `content-disposition:
/// attachment` header carrying `display_name`, forcing a download in the
/// browser rather than inline display. The content type is sniffed from the
/// file's own bytes.
pub async fn attachment_response(
    path: impl AsRef<Path>,
    display_name: &str,
) -> Result<Response> {
    let path = path.as_ref();

    let data = tokio::fs::read(path).await.map_err(|err| {
        ErrorKind::UploadIoError
            .with_message("The requested file could not be read")
            .with_context(format!("read {}: {}", path.display(), err))
            .into_static()
    })?;

    let disposition = format!("attachment; filename=\"{}\"", display_name);
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(detect_content_type(&data))
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|err| {
            ErrorKind::EncodeError
                .with_context(format!("invalid content-disposition value: {}", err))
                .into_static()
        })?,
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(data.len() as u64));

    Ok((StatusCode::OK, headers, Body::from(data)).into_response())
}

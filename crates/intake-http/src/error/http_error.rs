//! Payload error handling with builder pattern for dynamic error responses.
//!
//! Every failure either pipeline can produce is one of the [`ErrorKind`]
//! variants; the full [`Error`] adds an optional human-readable message and
//! internal context on top of the kind's canned response.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::ErrorResponse;

/// The error type for both payload pipelines.
///
/// Wraps an [`ErrorKind`] with an optional custom message (client-safe,
/// included in the response envelope) and optional context (diagnostic
/// detail for the embedding service).
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a custom client-safe message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Attaches diagnostic context to the error.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Converts this error into a static version by cloning all borrowed data.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            message: self.message.map(|m| Cow::Owned(m.into_owned())),
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
        }
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();

        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("name", &response.name)
            .field("status", &response.status);

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {}", context)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }

        if let Some(context) = self.context {
            response = response.with_context(context);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for payload operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of every failure the payload pipelines can report.
///
/// The first group covers multipart upload ingestion, the second strict
/// JSON decoding and encoding. Each variant maps to a canned response with
/// a fixed HTTP status code.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Upload pipeline
    /// 415 Unsupported Media Type - Sniffed content type is not allow-listed
    UnsupportedFileType,
    /// 413 Payload Too Large - Uploaded file exceeds the configured ceiling
    FileTooLarge,
    /// 500 Internal Server Error - Destination directory could not be created
    DirectoryCreateError,
    /// 500 Internal Server Error - Reading the part or writing to disk failed
    UploadIoError,

    // JSON pipeline
    /// 400 Bad Request - Request body was empty
    EmptyBody,
    /// 400 Bad Request - Body contains malformed JSON
    SyntaxError,
    /// 422 Unprocessable Entity - JSON value does not match the target type
    TypeMismatch,
    /// 400 Bad Request - Body ended in the middle of a JSON value
    UnexpectedEof,
    /// 400 Bad Request - Body contains a field the target does not declare
    UnknownField,
    /// 413 Payload Too Large - Body exceeds the configured byte ceiling
    BodyTooLarge,
    /// 400 Bad Request - Body contains more than one top-level JSON value
    MultipleJsonValues,
    /// 500 Internal Server Error - Response payload could not be serialized
    EncodeError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the canned response for this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::UnsupportedFileType => ErrorResponse::UNSUPPORTED_FILE_TYPE,
            Self::FileTooLarge => ErrorResponse::FILE_TOO_LARGE,
            Self::DirectoryCreateError => ErrorResponse::DIRECTORY_CREATE_ERROR,
            Self::UploadIoError => ErrorResponse::UPLOAD_IO_ERROR,
            Self::EmptyBody => ErrorResponse::EMPTY_BODY,
            Self::SyntaxError => ErrorResponse::SYNTAX_ERROR,
            Self::TypeMismatch => ErrorResponse::TYPE_MISMATCH,
            Self::UnexpectedEof => ErrorResponse::UNEXPECTED_EOF,
            Self::UnknownField => ErrorResponse::UNKNOWN_FIELD,
            Self::BodyTooLarge => ErrorResponse::BODY_TOO_LARGE,
            Self::MultipleJsonValues => ErrorResponse::MULTIPLE_JSON_VALUES,
            Self::EncodeError => ErrorResponse::ENCODE_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_kind() {
        let error = Error::new(ErrorKind::EmptyBody);
        assert_eq!(error.kind(), ErrorKind::EmptyBody);
        let _ = error.into_response();
    }

    #[test]
    fn error_with_message() {
        let error = ErrorKind::UnknownField.with_message("body contains unknown field \"fooo\"");
        assert_eq!(
            error.message(),
            Some("body contains unknown field \"fooo\""),
        );
        let _ = error.into_response();
    }

    #[test]
    fn error_with_context() {
        let error = ErrorKind::UploadIoError.with_context("disk full");
        assert_eq!(error.context(), Some("disk full"));
        let _ = error.into_response();
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::FileTooLarge
            .with_message("file exceeds 1 MiB")
            .with_context("wrote 1048577 bytes");

        assert_eq!(error.kind(), ErrorKind::FileTooLarge);
        assert_eq!(error.message(), Some("file exceeds 1 MiB"));
        assert_eq!(error.context(), Some("wrote 1048577 bytes"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::FileTooLarge
            .with_message("file exceeds 1 MiB")
            .with_context("wrote 1048577 bytes");

        let display = format!("{}", error);
        assert!(display.contains("file_too_large"));
        assert!(display.contains("413"));
        assert!(display.contains("file exceeds 1 MiB"));
        assert!(display.contains("wrote 1048577 bytes"));
    }

    #[test]
    fn std_error_trait() {
        let error = Error::new(ErrorKind::SyntaxError);
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn error_into_static() {
        let error = ErrorKind::TypeMismatch
            .with_message("wrong type".to_string())
            .with_context("line 1".to_string());

        let static_error = error.into_static();
        assert_eq!(static_error.message(), Some("wrong type"));
        assert_eq!(static_error.context(), Some("line 1"));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ErrorKind::UnsupportedFileType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        );
        assert_eq!(
            ErrorKind::FileTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE,
        );
        assert_eq!(
            ErrorKind::BodyTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE,
        );
        assert_eq!(
            ErrorKind::TypeMismatch.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY,
        );
        assert_eq!(ErrorKind::EmptyBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorKind::EncodeError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR,
        );
    }

    #[test]
    fn all_error_kinds_have_responses() {
        let kinds = vec![
            ErrorKind::UnsupportedFileType,
            ErrorKind::FileTooLarge,
            ErrorKind::DirectoryCreateError,
            ErrorKind::UploadIoError,
            ErrorKind::EmptyBody,
            ErrorKind::SyntaxError,
            ErrorKind::TypeMismatch,
            ErrorKind::UnexpectedEof,
            ErrorKind::UnknownField,
            ErrorKind::BodyTooLarge,
            ErrorKind::MultipleJsonValues,
            ErrorKind::EncodeError,
        ];

        for kind in kinds {
            let response = kind.response();
            assert!(!response.name.is_empty());
            assert!(response.status.as_u16() >= 400);
            assert!(!response.message.is_empty());
            let _ = kind.into_response();
        }
    }
}

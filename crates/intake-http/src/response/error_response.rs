use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Canned error response representation with security-conscious design.
///
/// This struct contains everything needed to serialize an error response:
/// the envelope `error` flag (always `true` here), the error name, a
/// client-safe message, optional diagnostic context, and the HTTP status
/// code the response is written with.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ErrorResponse<'a> {
    /// Envelope failure flag; always `true` for error responses.
    pub error: bool,
    /// The error name/type identifier.
    pub name: Cow<'a, str>,
    /// User-friendly error message safe for client display.
    pub message: Cow<'a, str>,
    /// Diagnostic context (optional, set by the failing pipeline).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON).
    #[serde(skip)]
    #[cfg_attr(feature = "schema", schemars(skip))]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // Upload pipeline
    pub const DIRECTORY_CREATE_ERROR: Self = Self::new(
        "directory_create_error",
        "The upload destination could not be prepared",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const FILE_TOO_LARGE: Self = Self::new(
        "file_too_large",
        "The uploaded file exceeds the maximum allowed size",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const UNSUPPORTED_FILE_TYPE: Self = Self::new(
        "unsupported_file_type",
        "The uploaded file type is not permitted",
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
    );
    pub const UPLOAD_IO_ERROR: Self = Self::new(
        "upload_io_error",
        "The upload could not be stored. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    // JSON pipeline
    pub const BODY_TOO_LARGE: Self = Self::new(
        "body_too_large",
        "The request body exceeds the maximum allowed size",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const EMPTY_BODY: Self = Self::new(
        "empty_body",
        "The request body must not be empty",
        StatusCode::BAD_REQUEST,
    );
    pub const ENCODE_ERROR: Self = Self::new(
        "encode_error",
        "The response could not be serialized",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MULTIPLE_JSON_VALUES: Self = Self::new(
        "multiple_json_values",
        "The request body must contain a single JSON value",
        StatusCode::BAD_REQUEST,
    );
    pub const SYNTAX_ERROR: Self = Self::new(
        "syntax_error",
        "The request body contains badly-formed JSON",
        StatusCode::BAD_REQUEST,
    );
    pub const TYPE_MISMATCH: Self = Self::new(
        "type_mismatch",
        "The request body contains a JSON value of the wrong type",
        StatusCode::UNPROCESSABLE_ENTITY,
    );
    pub const UNEXPECTED_EOF: Self = Self::new(
        "unexpected_eof",
        "The request body ended unexpectedly",
        StatusCode::BAD_REQUEST,
    );
    pub const UNKNOWN_FIELD: Self = Self::new(
        "unknown_field",
        "The request body contains an unknown field",
        StatusCode::BAD_REQUEST,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            error: true,
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Replaces the client-safe message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

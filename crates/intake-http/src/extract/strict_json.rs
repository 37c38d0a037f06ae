//! Strict JSON extractor with classified error handling.
//!
//! Wraps `serde_json` decoding with a byte-size ceiling, single-top-level-
//! value enforcement, and configurable tolerance for unrecognized fields.
//! Every failure path translates into one classified [`ErrorKind`] with a
//! message fit for direct inclusion in a response envelope.

use axum::body::Body;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{Error, ErrorKind, Result};

/// Default maximum allowed JSON payload size in bytes (1MB).
pub const DEFAULT_MAX_JSON_SIZE: usize = 1024 * 1024;

/// Per-call configuration for the JSON decode step.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct JsonConfig {
    /// Hard ceiling on bytes read from the request body.
    pub max_size: usize,
    /// Whether fields absent from the target's schema are tolerated.
    pub allow_unknown_fields: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_JSON_SIZE,
            allow_unknown_fields: false,
        }
    }
}

impl JsonConfig {
    /// Overrides the byte ceiling.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Tolerates fields the target type does not declare.
    pub fn with_allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }
}

/// Reads a request body and decodes exactly one JSON value from it.
///
/// Collection is capped at the configured ceiling before structural parsing
/// is attempted: a body of exactly `max_size` bytes succeeds, one byte over
/// fails with [`ErrorKind::BodyTooLarge`]. Decoding semantics are those of
/// [`from_slice`].
pub async fn read_json<T>(body: Body, config: &JsonConfig) -> Result<T>
where
    T: DeserializeOwned,
{
    let bytes = axum::body::to_bytes(body, config.max_size)
        .await
        .map_err(|err| {
            let message = err.to_string();
            if message.contains("length limit") {
                ErrorKind::BodyTooLarge.with_message(format!(
                    "body must not be larger than {} bytes",
                    config.max_size,
                ))
            } else {
                ErrorKind::UnexpectedEof
                    .with_message("body could not be read in full")
                    .with_context(message)
            }
            .into_static()
        })?;

    from_slice(&bytes, config)
}

/// Decodes exactly one JSON value from a byte slice into `T`.
///
/// Failure classification:
///
/// - empty or whitespace-only input fails with [`ErrorKind::EmptyBody`];
/// - input over the ceiling fails with [`ErrorKind::BodyTooLarge`];
/// - a field the target does not declare fails with
///   [`ErrorKind::UnknownField`] naming the field, unless unknown fields
///   are allowed;
/// - malformed tokens fail with [`ErrorKind::SyntaxError`], truncated input
///   with [`ErrorKind::UnexpectedEof`], JSON-to-target type mismatches with
///   [`ErrorKind::TypeMismatch`];
/// - trailing content after the first value fails with
///   [`ErrorKind::MultipleJsonValues`].
///
/// On error the target was never produced; partial decoding state is
/// discarded.
pub fn from_slice<T>(bytes: &[u8], config: &JsonConfig) -> Result<T>
where
    T: DeserializeOwned,
{
    if bytes.len() > config.max_size {
        return Err(ErrorKind::BodyTooLarge
            .with_message(format!(
                "body must not be larger than {} bytes",
                config.max_size,
            ))
            .into_static());
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ErrorKind::EmptyBody.into_error());
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);

    let value = if config.allow_unknown_fields {
        T::deserialize(&mut deserializer).map_err(classify_decode_error)?
    } else {
        let mut unknown: Option<String> = None;
        let value = serde_ignored::deserialize(&mut deserializer, |path| {
            unknown.get_or_insert_with(|| path.to_string());
        })
        .map_err(classify_decode_error)?;

        if let Some(field) = unknown {
            return Err(ErrorKind::UnknownField
                .with_message(format!("body contains unknown field {field:?}"))
                .into_static());
        }

        value
    };

    // Exactly one top-level value; anything after it is an error.
    deserializer.end().map_err(|err| {
        ErrorKind::MultipleJsonValues
            .with_message("body must contain only a single JSON value")
            .with_context(err.to_string())
            .into_static()
    })?;

    Ok(value)
}

/// Translates a `serde_json` decode failure into a classified [`Error`].
///
/// Positions are reported as line/column when the decoder provides them,
/// never fabricated.
fn classify_decode_error(err: serde_json::Error) -> Error<'static> {
    match err.classify() {
        Category::Eof => ErrorKind::UnexpectedEof
            .with_message("body contains badly-formed JSON (unexpected end of input)")
            .into_static(),
        Category::Syntax => ErrorKind::SyntaxError
            .with_message(format!(
                "body contains badly-formed JSON (at line {}, column {})",
                err.line(),
                err.column(),
            ))
            .with_context(err.to_string())
            .into_static(),
        Category::Data => {
            let detail = err.to_string();
            if detail.starts_with("unknown field") {
                let field = detail.split('`').nth(1).unwrap_or("?");
                ErrorKind::UnknownField
                    .with_message(format!("body contains unknown field {field:?}"))
                    .into_static()
            } else {
                ErrorKind::TypeMismatch
                    .with_message(format!(
                        "body contains an incorrect JSON type (at line {}, column {})",
                        err.line(),
                        err.column(),
                    ))
                    .with_context(detail)
                    .into_static()
            }
        }
        Category::Io => ErrorKind::UnexpectedEof
            .with_message("body could not be read in full")
            .with_context(err.to_string())
            .into_static(),
    }
}

/// Strict JSON extractor applying the default [`JsonConfig`].
///
/// A drop-in replacement for [`axum::Json`] that enforces the 1MB size
/// ceiling, rejects unknown fields, and requires exactly one top-level JSON
/// value. Rejections are classified [`Error`]s that serialize into the
/// uniform error envelope.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct StrictJson<T>(pub T);

impl<T> StrictJson<T> {
    /// Creates a new [`StrictJson`] wrapper around the provided value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let config = JsonConfig::default();
        let value = read_json(req.into_body(), &config).await?;
        Ok(Self::new(value))
    }
}

impl<T> IntoResponse for StrictJson<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

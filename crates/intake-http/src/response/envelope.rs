//! The uniform JSON wrapper for API responses.

use serde::{Deserialize, Serialize};

/// Uniform wire-level wrapper used for both success and failure responses.
///
/// Serializes as `{ "error": bool, "message": string, "data"?: any }`;
/// `data` is omitted entirely when absent. `error` is `false` on the happy
/// path and `true` with a human-readable `message` otherwise.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Envelope {
    /// Whether this response reports a failure.
    pub error: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Optional payload of arbitrary shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// Creates a happy-path envelope with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a failure envelope with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches a payload to the envelope.
    pub fn with_data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

//! Upload configuration and result records.

use serde::{Deserialize, Serialize};

/// Per-call configuration for the upload pipeline.
///
/// Read-only for the duration of one upload call; owned by the caller and
/// passed by reference into the pipeline.
#[must_use]
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum size in bytes for a single uploaded file.
    pub max_file_size: u64,
    /// Media types accepted by the pipeline. Empty means unrestricted.
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: u64::MAX,
            allowed_types: Vec::new(),
        }
    }
}

impl UploadConfig {
    /// Overrides the per-file size ceiling.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Restricts accepted media types to the given allow-list.
    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true when the sniffed `content_type` passes the allow-list.
    pub fn is_allowed(&self, content_type: &str) -> bool {
        self.allowed_types.is_empty()
            || self
                .allowed_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}

/// Result of ingesting one multipart part.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Filename as declared by the client. Untrusted.
    pub original_file_name: String,
    /// Name the file was actually written under.
    pub new_file_name: String,
    /// Bytes written to storage.
    pub file_size: u64,
}

//! Multipart file upload ingestion.
//!
//! Parses an incoming multipart body part-by-part, identifies the real
//! content type by sniffing initial bytes (never trusting the declared
//! header), validates it against an allow-list, derives a safe destination
//! filename, and streams each part to persistent storage.

mod config;
mod pipeline;

pub use config::{UploadConfig, UploadedFile};
pub use pipeline::{upload_files, upload_one_file};

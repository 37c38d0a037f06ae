//! Convenient re-exports for common use.

pub use crate::fs::{ensure_dir, generated_file_name, sanitize_file_name};
pub use crate::random::random_string;
pub use crate::sniff::detect_content_type;
pub use crate::text::slugify;

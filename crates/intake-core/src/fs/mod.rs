//! Filesystem helpers: idempotent directory creation and safe filenames.
//!
//! Client-declared filenames are untrusted input. Before anything derived
//! from one touches the filesystem it is reduced to its base component so
//! path traversal segments cannot survive into a destination path.

use std::io;
use std::path::{Component, Path};

use crate::random::random_string;

/// Length of the random stem in generated filenames.
pub const GENERATED_STEM_LEN: usize = 25;

/// Stand-in used when sanitizing leaves nothing usable of a filename.
const FALLBACK_FILE_NAME: &str = "unnamed";

/// Creates `path` and all missing parents.
///
/// Idempotent: succeeds when the directory already exists.
pub async fn ensure_dir(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path).await?;
    tracing::trace!(target: crate::TRACING_TARGET_FS, path = %path.display(), "directory ensured");
    Ok(())
}

/// Reduces an untrusted filename to its final base component.
///
/// Directory prefixes, `..` segments, and separator characters are all
/// dropped; only the last normal path component survives. An input with no
/// normal component at all falls back to a fixed stand-in name.
pub fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .next_back()
        .filter(|part| !part.is_empty() && *part != "..")
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_owned()
}

/// Produces a collision-resistant filename preserving the original extension.
///
/// The stem is [`GENERATED_STEM_LEN`] random charset characters; the
/// extension is taken from the sanitized original name, when it has one.
pub fn generated_file_name(original: &str) -> String {
    let sanitized = sanitize_file_name(original);
    let stem = random_string(GENERATED_STEM_LEN);

    match Path::new(&sanitized).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::CHARSET;

    #[tokio::test]
    async fn ensure_dir_is_idempotent() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a/b/c");

        ensure_dir(&nested).await?;
        ensure_dir(&nested).await?;

        assert!(nested.is_dir());
        Ok(())
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("uploads/photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("/etc/passwd"), "passwd");
    }

    #[test]
    fn sanitize_drops_traversal_segments() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".."), "unnamed");
        assert_eq!(sanitize_file_name("../.."), "unnamed");
    }

    #[test]
    fn sanitize_handles_empty_input() {
        assert_eq!(sanitize_file_name(""), "unnamed");
        assert_eq!(sanitize_file_name("/"), "unnamed");
    }

    #[test]
    fn generated_name_preserves_extension() {
        let name = generated_file_name("holiday.jpeg");
        assert_eq!(name.len(), GENERATED_STEM_LEN + ".jpeg".len());
        assert!(name.ends_with(".jpeg"));

        let stem = &name[..GENERATED_STEM_LEN];
        assert!(stem.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn generated_name_without_extension() {
        let name = generated_file_name("README");
        assert_eq!(name.len(), GENERATED_STEM_LEN);
    }

    #[test]
    fn generated_name_ignores_directory_prefix() {
        let name = generated_file_name("../../secret/dump.png");
        assert!(name.ends_with(".png"));
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }
}

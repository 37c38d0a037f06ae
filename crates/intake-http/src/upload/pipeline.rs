//! The single-part and multi-part upload steps.

use std::path::Path;

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use intake_core::fs::{ensure_dir, generated_file_name, sanitize_file_name};
use intake_core::sniff::{SNIFF_LEN, detect_content_type};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, ErrorKind, Result};
use crate::upload::{UploadConfig, UploadedFile};

/// Tracing target for upload operations.
const TRACING_TARGET: &str = "intake_http::upload";

/// Ingests every file part of a multipart body, in arrival order.
///
/// Parts without a client-declared filename are plain form values and are
/// skipped. Fails fast on the first error without processing further parts;
/// files written for earlier parts of the same batch are NOT removed -- the
/// caller decides whether to clean up. The embedding router should install a
/// whole-request ceiling (see [`crate::middleware::body_limit_layer`]) ahead
/// of multipart parsing.
pub async fn upload_files(
    mut multipart: Multipart,
    dest_dir: impl AsRef<Path>,
    rename: bool,
    config: &UploadConfig,
) -> Result<Vec<UploadedFile>> {
    let dest_dir = dest_dir.as_ref();
    let mut uploaded = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let file = save_field(field, &original_name, dest_dir, rename, config).await?;
        uploaded.push(file);
    }

    Ok(uploaded)
}

/// Ingests the first file part of a multipart body, ignoring the rest.
///
/// Behaves exactly like [`upload_files`] for that part. Fails with
/// [`ErrorKind::UploadIoError`] when the body contains no file part at all.
pub async fn upload_one_file(
    mut multipart: Multipart,
    dest_dir: impl AsRef<Path>,
    rename: bool,
    config: &UploadConfig,
) -> Result<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        return save_field(field, &original_name, dest_dir.as_ref(), rename, config).await;
    }

    Err(ErrorKind::UploadIoError
        .with_message("multipart body contained no file part")
        .into_static())
}

/// Consumes one multipart file part and streams it to disk.
///
/// Buffers a bounded prefix for content sniffing, validates the sniffed type
/// against the allow-list before anything touches storage, then replays the
/// prefix ahead of the remaining chunks into the destination file. The
/// partial file is removed on every failure past its creation.
async fn save_field(
    mut field: Field<'_>,
    original_name: &str,
    dest_dir: &Path,
    rename: bool,
    config: &UploadConfig,
) -> Result<UploadedFile> {
    let mut prefix: Vec<u8> = Vec::with_capacity(SNIFF_LEN);
    while prefix.len() < SNIFF_LEN {
        match field.chunk().await.map_err(read_error)? {
            Some(chunk) => prefix.extend_from_slice(&chunk),
            None => break,
        }
    }

    let content_type = detect_content_type(&prefix);
    if !config.is_allowed(content_type) {
        tracing::debug!(
            target: TRACING_TARGET,
            original_name = %original_name,
            content_type = %content_type,
            "rejecting file with disallowed content type"
        );
        return Err(ErrorKind::UnsupportedFileType
            .with_message(format!("file type {content_type:?} is not permitted"))
            .into_static());
    }

    ensure_dir(dest_dir).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %err,
            dest_dir = %dest_dir.display(),
            "failed to create destination directory"
        );
        ErrorKind::DirectoryCreateError
            .with_context(format!("create {}: {}", dest_dir.display(), err))
            .into_static()
    })?;

    let new_file_name = if rename {
        generated_file_name(original_name)
    } else {
        sanitize_file_name(original_name)
    };
    let dest_path = dest_dir.join(&new_file_name);

    let mut file = File::create(&dest_path).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %err,
            path = %dest_path.display(),
            "failed to create destination file"
        );
        ErrorKind::UploadIoError
            .with_context(format!("create {}: {}", dest_path.display(), err))
            .into_static()
    })?;

    match copy_part(&mut field, &mut file, &prefix, config.max_file_size).await {
        Ok(file_size) => {
            tracing::debug!(
                target: TRACING_TARGET,
                original_name = %original_name,
                new_file_name = %new_file_name,
                file_size,
                "file stored"
            );

            Ok(UploadedFile {
                original_file_name: original_name.to_owned(),
                new_file_name,
                file_size,
            })
        }
        Err(error) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(&dest_path).await {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %remove_err,
                    path = %dest_path.display(),
                    "failed to remove partial upload"
                );
            }
            Err(error)
        }
    }
}

/// Writes the sniffed prefix followed by the remaining field chunks,
/// counting bytes and enforcing the size ceiling as it goes.
async fn copy_part(
    field: &mut Field<'_>,
    file: &mut File,
    prefix: &[u8],
    max_file_size: u64,
) -> Result<u64> {
    let mut written: u64 = 0;

    write_counted(file, prefix, &mut written, max_file_size).await?;
    while let Some(chunk) = field.chunk().await.map_err(read_error)? {
        write_counted(file, &chunk, &mut written, max_file_size).await?;
    }

    file.flush().await.map_err(write_error)?;
    Ok(written)
}

async fn write_counted(
    file: &mut File,
    chunk: &[u8],
    written: &mut u64,
    max_file_size: u64,
) -> Result<()> {
    *written += chunk.len() as u64;
    if *written > max_file_size {
        return Err(ErrorKind::FileTooLarge
            .with_message(format!(
                "file exceeds maximum size of {max_file_size} bytes",
            ))
            .into_static());
    }

    file.write_all(chunk).await.map_err(write_error)
}

fn read_error(err: MultipartError) -> Error<'static> {
    ErrorKind::UploadIoError
        .with_message("the upload stream could not be read")
        .with_context(err.to_string())
        .into_static()
}

fn write_error(err: std::io::Error) -> Error<'static> {
    ErrorKind::UploadIoError
        .with_context(format!("write failed: {}", err))
        .into_static()
}

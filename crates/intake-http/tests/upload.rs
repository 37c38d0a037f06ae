//! End-to-end tests for the multipart upload pipeline.

use std::path::PathBuf;

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use intake_http::upload::{UploadConfig, UploadedFile, upload_files, upload_one_file};
use serde_json::Value;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// A blob that sniffs as `image/png`.
fn png_bytes(total_len: usize) -> Vec<u8> {
    let mut data = PNG_MAGIC.to_vec();
    data.resize(total_len, 0x42);
    data
}

#[derive(Clone)]
struct UploadState {
    dest_dir: PathBuf,
    rename: bool,
    config: UploadConfig,
}

async fn upload_many(
    State(state): State<UploadState>,
    multipart: Multipart,
) -> Result<Json<Vec<UploadedFile>>, intake_http::Error<'static>> {
    let files = upload_files(multipart, &state.dest_dir, state.rename, &state.config).await?;
    Ok(Json(files))
}

async fn upload_one(
    State(state): State<UploadState>,
    multipart: Multipart,
) -> Result<Json<UploadedFile>, intake_http::Error<'static>> {
    let file = upload_one_file(multipart, &state.dest_dir, state.rename, &state.config).await?;
    Ok(Json(file))
}

fn test_server(state: UploadState) -> anyhow::Result<TestServer> {
    let router = Router::new()
        .route("/uploads", post(upload_many))
        .route("/upload", post(upload_one))
        .with_state(state);
    Ok(TestServer::new(router)?)
}

fn png_form(field_name: &str, file_name: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        field_name.to_owned(),
        Part::bytes(data).file_name(file_name.to_owned()),
    )
}

#[tokio::test]
async fn allowed_type_is_stored_without_rename() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default().with_allowed_types(["image/png", "image/jpeg"]),
    })?;

    let source = png_bytes(1024);
    let response = server
        .post("/uploads")
        .multipart(png_form("file", "gola.png", source.clone()))
        .await;

    response.assert_status_ok();
    let files: Vec<UploadedFile> = response.json();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].original_file_name, "gola.png");
    assert_eq!(files[0].new_file_name, "gola.png");
    assert_eq!(files[0].file_size, source.len() as u64);

    let stored = dest.path().join(&files[0].new_file_name);
    assert_eq!(std::fs::read(stored)?, source);
    Ok(())
}

#[tokio::test]
async fn rename_generates_fresh_name_with_extension() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: true,
        config: UploadConfig::default().with_allowed_types(["image/png"]),
    })?;

    let response = server
        .post("/uploads")
        .multipart(png_form("file", "gola.png", png_bytes(64)))
        .await;

    response.assert_status_ok();
    let files: Vec<UploadedFile> = response.json();

    assert_ne!(files[0].new_file_name, "gola.png");
    assert!(files[0].new_file_name.ends_with(".png"));
    assert_eq!(files[0].new_file_name.len(), 25 + ".png".len());
    assert!(dest.path().join(&files[0].new_file_name).is_file());
    Ok(())
}

#[tokio::test]
async fn disallowed_type_writes_nothing() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default().with_allowed_types(["image/jpeg"]),
    })?;

    let response = server
        .post("/uploads")
        .multipart(png_form("file", "gola.png", png_bytes(64)))
        .await;

    response.assert_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body: Value = response.json();
    assert_eq!(body["error"], Value::Bool(true));
    assert_eq!(body["name"], "unsupported_file_type");

    assert_eq!(std::fs::read_dir(dest.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn batch_failure_keeps_earlier_files_and_stops() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default().with_allowed_types(["image/png"]),
    })?;

    let mut gif = b"GIF89a".to_vec();
    gif.resize(64, 0x00);

    let form = MultipartForm::new()
        .add_part("first", Part::bytes(png_bytes(64)).file_name("first.png"))
        .add_part("second", Part::bytes(gif).file_name("second.gif"))
        .add_part("third", Part::bytes(png_bytes(64)).file_name("third.png"));

    let response = server.post("/uploads").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body: Value = response.json();
    assert_eq!(body["name"], "unsupported_file_type");

    // Fail-fast without rollback: the first file stays, the rejected part
    // leaves nothing behind, and the third part is never reached.
    assert!(dest.path().join("first.png").is_file());
    assert!(!dest.path().join("second.gif").exists());
    assert!(!dest.path().join("third.png").exists());
    Ok(())
}

#[tokio::test]
async fn declared_content_type_is_never_trusted() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default().with_allowed_types(["image/png"]),
    })?;

    // Declared as text, but the bytes are a PNG; sniffing must win.
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(png_bytes(64))
            .file_name("fake.txt")
            .mime_type("text/plain"),
    );

    let response = server.post("/uploads").multipart(form).await;
    response.assert_status_ok();
    Ok(())
}

#[tokio::test]
async fn oversized_file_leaves_no_partial_artifact() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default()
            .with_allowed_types(["image/png"])
            .with_max_file_size(256),
    })?;

    let response = server
        .post("/uploads")
        .multipart(png_form("file", "big.png", png_bytes(4096)))
        .await;

    response.assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = response.json();
    assert_eq!(body["name"], "file_too_large");

    assert!(!dest.path().join("big.png").exists());
    Ok(())
}

#[tokio::test]
async fn parts_are_processed_in_arrival_order() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default(),
    })?;

    let form = MultipartForm::new()
        .add_part("first", Part::bytes(png_bytes(32)).file_name("a.png"))
        .add_part("second", Part::bytes(png_bytes(48)).file_name("b.png"));

    let response = server.post("/uploads").multipart(form).await;
    response.assert_status_ok();

    let files: Vec<UploadedFile> = response.json();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].new_file_name, "a.png");
    assert_eq!(files[1].new_file_name, "b.png");
    Ok(())
}

#[tokio::test]
async fn value_fields_are_skipped() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default(),
    })?;

    let form = MultipartForm::new()
        .add_text("description", "holiday pictures")
        .add_part("file", Part::bytes(png_bytes(32)).file_name("c.png"));

    let response = server.post("/uploads").multipart(form).await;
    response.assert_status_ok();

    let files: Vec<UploadedFile> = response.json();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].new_file_name, "c.png");
    Ok(())
}

#[tokio::test]
async fn single_file_entry_point_ignores_extra_parts() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default(),
    })?;

    let form = MultipartForm::new()
        .add_part("first", Part::bytes(png_bytes(32)).file_name("keep.png"))
        .add_part("second", Part::bytes(png_bytes(32)).file_name("ignore.png"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_ok();

    let file: UploadedFile = response.json();
    assert_eq!(file.new_file_name, "keep.png");
    assert!(!dest.path().join("ignore.png").exists());
    Ok(())
}

#[tokio::test]
async fn single_file_entry_point_rejects_body_without_files() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default(),
    })?;

    let form = MultipartForm::new()
        .add_text("description", "no attachment")
        .add_text("mood", "optimistic");

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["name"], "upload_io_error");

    assert_eq!(std::fs::read_dir(dest.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn traversal_in_filename_cannot_escape_destination() -> anyhow::Result<()> {
    let dest = tempfile::tempdir()?;
    let server = test_server(UploadState {
        dest_dir: dest.path().to_owned(),
        rename: false,
        config: UploadConfig::default(),
    })?;

    let form = png_form("file", "../../escape.png", png_bytes(32));
    let response = server.post("/uploads").multipart(form).await;
    response.assert_status_ok();

    let files: Vec<UploadedFile> = response.json();
    assert_eq!(files[0].new_file_name, "escape.png");
    assert!(dest.path().join("escape.png").is_file());
    Ok(())
}

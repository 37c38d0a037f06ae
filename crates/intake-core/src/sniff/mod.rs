//! Content-type detection from magic bytes.
//!
//! Client-declared `Content-Type` headers are attacker-controlled and must
//! never gate filesystem writes. [`detect_content_type`] inspects the data's
//! own byte signature instead, working on a bounded prefix of the stream.

/// Number of leading bytes that is sufficient for signature inspection.
///
/// Callers buffering a stream prefix for sniffing never need to hold more
/// than this many bytes before handing the data to [`detect_content_type`].
pub const SNIFF_LEN: usize = 512;

/// Fallback media type when no signature matches and the data is not text.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Detects the media type of `data` from its byte signature.
///
/// Only the first [`SNIFF_LEN`] bytes are considered. The result is
/// independent of any declared header and is a pure function of the input.
/// Unrecognized binary data yields [`OCTET_STREAM`]; data that looks like
/// valid UTF-8 without control bytes yields `text/plain`.
pub fn detect_content_type(data: &[u8]) -> &'static str {
    let data = &data[..data.len().min(SNIFF_LEN)];

    if data.is_empty() {
        return "text/plain";
    }

    // PNG
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return "image/png";
    }

    // JPEG
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }

    // GIF
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return "image/gif";
    }

    // WebP
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return "image/webp";
    }

    // TIFF (little-endian)
    if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) {
        return "image/tiff";
    }

    // TIFF (big-endian)
    if data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
        return "image/tiff";
    }

    // BMP
    if data.starts_with(b"BM") {
        return "image/bmp";
    }

    // PDF
    if data.starts_with(b"%PDF") {
        return "application/pdf";
    }

    // ZIP-based formats (DOCX, XLSX, ODT, JAR, etc.)
    if data.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
        return "application/zip";
    }

    // GZIP
    if data.starts_with(&[0x1F, 0x8B, 0x08]) {
        return "application/x-gzip";
    }

    // WAVE
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
        return "audio/wave";
    }

    if looks_like_text(data) {
        return "text/plain";
    }

    OCTET_STREAM
}

/// Returns true when the prefix is plausible plain text: valid UTF-8 (a
/// truncated trailing code point is tolerated) with no control bytes other
/// than whitespace.
fn looks_like_text(data: &[u8]) -> bool {
    let valid = match std::str::from_utf8(data) {
        Ok(text) => text,
        // The prefix may cut a multi-byte code point short; tolerate a
        // truncated final code point but nothing else.
        Err(err) if err.error_len().is_none() && err.valid_up_to() > 0 => {
            match std::str::from_utf8(&data[..err.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    valid
        .chars()
        .all(|ch| !ch.is_control() || ch.is_whitespace())
}

//! Request body size limiting middleware.
//!
//! The upload orchestrator consumes a single-pass multipart stream; the
//! whole-request ceiling that protects it against unbounded bodies has to be
//! installed on the router, ahead of parsing.

use tower_http::limit::RequestBodyLimitLayer;

/// Default maximum request body size: 16MB
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Creates a request body size limit layer with the default size (16MB).
pub fn default_body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(DEFAULT_MAX_BODY_SIZE)
}

/// Creates a request body size limit layer with a custom size.
///
/// # Arguments
///
/// * `max_size` - Maximum allowed request body size in bytes
pub fn body_limit_layer(max_size: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_size)
}

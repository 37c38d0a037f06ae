//! Strict JSON request body decoding.
//!
//! This module provides the size-capped, single-value JSON decode step used
//! by API handlers: [`read_json`] / [`from_slice`] for direct use, and
//! [`StrictJson`], a drop-in extractor applying the default [`JsonConfig`].

mod strict_json;

pub use strict_json::{DEFAULT_MAX_JSON_SIZE, JsonConfig, StrictJson, from_slice, read_json};

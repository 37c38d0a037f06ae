#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Intake Core
//!
//! This crate provides the leaf utilities the intake payload pipelines are
//! built from: content-type sniffing, safe filename derivation, fixed-charset
//! random strings, and slugification. Everything here is free of HTTP types
//! so it can be reused outside of request handlers.

/// Tracing target for filesystem operations.
pub const TRACING_TARGET_FS: &str = "intake_core::fs";

pub mod fs;
pub mod prelude;
pub mod random;
pub mod sniff;
pub mod text;

// Re-export key functions for convenience
pub use crate::sniff::detect_content_type;

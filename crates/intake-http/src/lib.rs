#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod middleware;
pub mod response;
pub mod upload;

pub use crate::error::{Error, ErrorKind, Result};

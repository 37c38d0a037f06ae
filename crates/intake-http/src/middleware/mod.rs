//! Request-level protections for the payload pipelines.

mod body_limit;

pub use body_limit::{DEFAULT_MAX_BODY_SIZE, body_limit_layer, default_body_limit_layer};

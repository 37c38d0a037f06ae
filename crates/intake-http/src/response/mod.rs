//! Response envelope and JSON response writers.

mod envelope;
mod error_response;
mod writer;

pub use envelope::Envelope;
pub use error_response::ErrorResponse;
pub use writer::{attachment_response, write_error_json, write_json};

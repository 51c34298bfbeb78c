// Error kinds for reading and decoding status.dat

use thiserror::Error;

/// The status file could not be obtained. Fatal for the whole parse.
#[derive(Debug, Error)]
#[error("failed to read status from {origin}: {source}")]
pub struct SourceReadError {
    pub origin: String,
    #[source]
    pub source: std::io::Error,
}

/// A single block could not be converted into its record shape.
/// The block is skipped and the parse continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockDecodeError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` expects an integer, got {value:?}")]
    InvalidInteger { field: String, value: String },
    #[error("field `{field}` expects a decimal number, got {value:?}")]
    InvalidDecimal { field: String, value: String },
    #[error("field `{field}` expects 0 or 1, got {value:?}")]
    InvalidFlag { field: String, value: String },
}

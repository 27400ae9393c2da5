//! Error types for the Floodgate library.

use thiserror::Error;

/// Main error type for Floodgate operations.
///
/// An admission denial is not an error: it is reported through
/// [`Decision::allowed`](crate::ratelimit::Decision), and callers must
/// branch on the result rather than on error control flow.
#[derive(Error, Debug)]
pub enum FloodgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller supplied an empty identifier
    #[error("Identifier must be a non-empty string")]
    InvalidIdentifier,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Floodgate operations.
pub type Result<T> = std::result::Result<T, FloodgateError>;

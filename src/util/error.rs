//! Error types for auxiliary data lookups.

use thiserror::Error;

/// Main error type for auxdepth operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Top-level "file contents/images" path is missing or has the wrong shape.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// Required key not present in an auxiliary info mapping
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// Value present but of the wrong type
    #[error("Type mismatch for {key}: expected {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    /// Data description fields are inconsistent
    #[error("Invalid data description: {0}")]
    InvalidDescription(String),

    /// Pixel format code not recognised
    #[error("Unsupported pixel format: 0x{0:08x}")]
    UnsupportedPixelFormat(u32),

    /// Data buffer shorter than the description requires
    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed container error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedContainer(msg.into())
    }

    /// Create an invalid description error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidDescription(msg.into())
    }

    /// Create a missing key error.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingKey(key.into())
    }

    /// True for the structural failures that make a container unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedContainer(_))
    }
}

/// Result type alias for auxdepth operations.
pub type Result<T> = std::result::Result<T, Error>;

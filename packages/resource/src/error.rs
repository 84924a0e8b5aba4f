//! Error types for resource access.
//!
//! These are request-level failures: the store could not be reached, the
//! address did not resolve, or the stored bytes were not a valid payload.
//! Domain failures such as divide-by-zero are not errors at this layer; they
//! are ordinary [`ErrorPayload`](crate::ErrorPayload) content.

/// Errors raised while reading or writing resources.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The address does not resolve in the store.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// The stored content could not be decoded as the expected payload.
    #[error("malformed payload at {path}: {message}")]
    MalformedPayload { path: String, message: String },

    /// The store call failed, timed out, or returned a non-success status.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Content could not be serialized into its canonical shape.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound { path: path.into() }
    }

    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedPayload {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }
}

/// Result type alias for resource operations.
pub type Result<T> = std::result::Result<T, Error>;

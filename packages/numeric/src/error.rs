//! Request-level failures of an operation.
//!
//! Domain failures (divide-by-zero, invalid subtraction) never appear here.
//! They are committed as `ErrorOutput` resources and the request succeeds.

use cafs_resource::Error as ResourceError;

use crate::operation::Operation;

#[derive(thiserror::Error, Debug)]
pub enum OperationError {
    /// The request body does not match the operation's schema.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// A read or write against the store failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The result does not fit in a signed 64-bit integer.
    #[error("arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: Operation },

    /// A role table override is inconsistent.
    #[error("invalid role table: {message}")]
    InvalidRoleTable { message: String },
}

impl OperationError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        OperationError::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn invalid_role_table(message: impl Into<String>) -> Self {
        OperationError::InvalidRoleTable {
            message: message.into(),
        }
    }
}

/// Result type alias for operation execution.
pub type Result<T> = std::result::Result<T, OperationError>;
